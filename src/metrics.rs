use serde::{Serialize, Deserialize};
use std::str::FromStr;

use crate::error::NnError;
use crate::math::matrix::Matrix;

/// Decision threshold for binary accuracy; a prediction counts as class 1
/// when it is strictly above it.
pub const THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Accuracy,
}

impl Metric {
    pub fn compute(&self, predicted: &Matrix, expected: &Matrix) -> f64 {
        match self {
            Metric::Accuracy => binary_accuracy(predicted, expected),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Metric::Accuracy => "accuracy",
        }
    }
}

impl FromStr for Metric {
    type Err = NnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accuracy" | "binary_accuracy" | "acc" => Ok(Metric::Accuracy),
            other => Err(NnError::UnknownName { kind: "metric", name: other.to_string() }),
        }
    }
}

/// Fraction of elements whose thresholded prediction equals the label.
pub fn binary_accuracy(predicted: &Matrix, expected: &Matrix) -> f64 {
    if predicted.is_empty() {
        return 0.0;
    }
    let correct = predicted.data.iter().zip(&expected.data)
        .filter(|&(&p, &y)| {
            let class = if p > THRESHOLD { 1.0 } else { 0.0 };
            class == y
        })
        .count();
    correct as f64 / predicted.len() as f64
}
