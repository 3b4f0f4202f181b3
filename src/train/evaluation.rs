use serde::{Serialize, Deserialize};

use crate::error::{NnError, Result};
use crate::math::matrix::Matrix;
use crate::metrics::Metric;
use crate::network::network::Sequential;

/// Result of scoring a model on a labelled set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub loss: f64,
    pub accuracy: Option<f64>,
}

/// Mean loss and compiled metrics over the full set. Does not touch the
/// model's parameters or optimizer state.
pub fn evaluate(model: &Sequential, inputs: &Matrix, labels: &Matrix) -> Result<Evaluation> {
    let options = model.compile_options().ok_or(NnError::NotCompiled)?;
    model.check_labelled(inputs, labels)?;
    if inputs.rows == 0 {
        return Err(NnError::InvalidInput("evaluation data is empty"));
    }

    let output = model.predict(inputs)?;
    let accuracy = options
        .metrics
        .contains(&Metric::Accuracy)
        .then(|| Metric::Accuracy.compute(&output, labels));

    Ok(Evaluation {
        loss: options.loss.loss(&output, labels),
        accuracy,
    })
}
