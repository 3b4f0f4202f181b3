use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::activation::activation::ActivationFunction;
use crate::error::Result;
use crate::network::network::Sequential;

/// Width of each hidden layer.
pub const HIDDEN_UNITS: usize = 64;

/// Builds and compiles the binary classifier:
/// input → Dense(64, relu) → Dense(64, relu) → Dense(1, sigmoid),
/// trained with Adam on binary cross-entropy and reporting accuracy.
pub fn create_model(input_size: usize) -> Result<Sequential> {
    create_model_seeded(input_size, StdRng::from_entropy().gen())
}

/// Same as [`create_model`] with reproducible initialization and shuffling.
pub fn create_model_seeded(input_size: usize, seed: u64) -> Result<Sequential> {
    let mut model = Sequential::with_seed(seed);
    model.input(input_size)?;
    model.add_dense(HIDDEN_UNITS, ActivationFunction::ReLU)?;
    model.add_dense(HIDDEN_UNITS, ActivationFunction::ReLU)?;
    model.add_dense(1, ActivationFunction::Sigmoid)?;
    model.compile("adam", "binary_crossentropy", &["accuracy"])?;
    debug!("created binary classifier with {} parameters", model.param_count());
    Ok(model)
}
