use serde::{Serialize, Deserialize};
use std::str::FromStr;

use crate::error::NnError;
use crate::loss::{bce::BceLoss, mse::MseLoss};
use crate::math::matrix::Matrix;

/// Selects which loss function the training loop uses.
///
/// - `BinaryCrossEntropy` — pair with a single Sigmoid output.
/// - `Mse`                — mean-squared error; pair with Linear or Sigmoid output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    BinaryCrossEntropy,
    Mse,
}

impl LossType {
    /// Mean loss over every element of the batch.
    pub fn loss(&self, predicted: &Matrix, expected: &Matrix) -> f64 {
        match self {
            LossType::BinaryCrossEntropy => BceLoss::loss(predicted, expected),
            LossType::Mse => MseLoss::loss(predicted, expected),
        }
    }

    /// ∂loss/∂predicted, same shape as `predicted`.
    pub fn derivative(&self, predicted: &Matrix, expected: &Matrix) -> Matrix {
        match self {
            LossType::BinaryCrossEntropy => BceLoss::derivative(predicted, expected),
            LossType::Mse => MseLoss::derivative(predicted, expected),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LossType::BinaryCrossEntropy => "binary_crossentropy",
            LossType::Mse => "mse",
        }
    }
}

impl FromStr for LossType {
    type Err = NnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary_crossentropy" => Ok(LossType::BinaryCrossEntropy),
            "mse" | "mean_squared_error" => Ok(LossType::Mse),
            other => Err(NnError::UnknownName { kind: "loss", name: other.to_string() }),
        }
    }
}
