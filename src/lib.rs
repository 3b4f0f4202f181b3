pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod loss;
pub mod optim;
pub mod metrics;
pub mod network;
pub mod train;
pub mod data;
pub mod config;
pub mod experiment;

// Convenience re-exports
pub use error::{NnError, Result};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Dense;
pub use network::{create_model, create_model_seeded, CompileOptions, Sequential};
pub use train::{EpochStats, Evaluation, FitConfig, History};
pub use data::Dataset;
pub use config::ExperimentConfig;
