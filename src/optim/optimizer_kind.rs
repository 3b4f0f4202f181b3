use serde::{Serialize, Deserialize};
use std::str::FromStr;

use super::{Adam, Optimizer, Sgd};
use crate::error::NnError;

/// Serializable description of an optimizer and its hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OptimizerKind {
    Sgd { learning_rate: f64 },
    Adam { learning_rate: f64, beta1: f64, beta2: f64, epsilon: f64 },
}

impl OptimizerKind {
    /// Instantiates a fresh optimizer with empty state.
    pub fn build(&self) -> Box<dyn Optimizer> {
        match *self {
            OptimizerKind::Sgd { learning_rate } => Box::new(Sgd::new(learning_rate)),
            OptimizerKind::Adam { learning_rate, beta1, beta2, epsilon } => {
                Box::new(Adam::new(learning_rate, beta1, beta2, epsilon))
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OptimizerKind::Sgd { .. } => "sgd",
            OptimizerKind::Adam { .. } => "adam",
        }
    }
}

/// Looks an optimizer up by name with default hyperparameters.
impl FromStr for OptimizerKind {
    type Err = NnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sgd" => Ok(OptimizerKind::Sgd { learning_rate: Sgd::DEFAULT_LEARNING_RATE }),
            "adam" => Ok(OptimizerKind::Adam {
                learning_rate: Adam::DEFAULT_LEARNING_RATE,
                beta1: Adam::DEFAULT_BETA1,
                beta2: Adam::DEFAULT_BETA2,
                epsilon: Adam::DEFAULT_EPSILON,
            }),
            other => Err(NnError::UnknownName { kind: "optimizer", name: other.to_string() }),
        }
    }
}
