pub mod epoch_stats;
pub mod evaluation;
pub mod history;
pub mod loop_fn;
pub mod train_config;

pub use epoch_stats::EpochStats;
pub use evaluation::Evaluation;
pub use history::History;
pub use loop_fn::train_loop;
pub use train_config::FitConfig;
