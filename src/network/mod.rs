pub mod factory;
pub mod network;
pub mod spec;

pub use factory::{create_model, create_model_seeded};
pub use network::Sequential;
pub use spec::{CompileOptions, SavedModel};
