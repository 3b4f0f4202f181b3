use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::layers::dense::Dense;
use crate::loss::loss_type::LossType;
use crate::metrics::Metric;
use crate::optim::optimizer_kind::OptimizerKind;

/// Optimizer, loss and metrics chosen at compile time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileOptions {
    pub optimizer: OptimizerKind,
    pub loss: LossType,
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

impl CompileOptions {
    /// Resolves each component by its registered name, e.g.
    /// `("adam", "binary_crossentropy", &["accuracy"])`.
    pub fn from_names(optimizer: &str, loss: &str, metrics: &[&str]) -> Result<CompileOptions> {
        Ok(CompileOptions {
            optimizer: optimizer.parse()?,
            loss: loss.parse()?,
            metrics: metrics.iter().map(|m| m.parse()).collect::<Result<_>>()?,
        })
    }
}

/// On-disk form of a `Sequential`: architecture, weights and compile options.
///
/// Optimizer moments are not stored; a loaded model resumes with a fresh
/// optimizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedModel {
    pub input_size: usize,
    pub layers: Vec<Dense>,
    #[serde(default)]
    pub compile: Option<CompileOptions>,
}

impl SavedModel {
    /// Serializes to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `SavedModel` from a JSON file written by `save_json`.
    pub fn load_json(path: impl AsRef<std::path::Path>) -> Result<SavedModel> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NnError;

    #[test]
    fn test_from_names() {
        let opts =
            CompileOptions::from_names("adam", "binary_crossentropy", &["accuracy"]).unwrap();
        assert_eq!(opts.optimizer.name(), "adam");
        assert_eq!(opts.loss, LossType::BinaryCrossEntropy);
        assert_eq!(opts.metrics, vec![Metric::Accuracy]);
    }

    #[test]
    fn test_from_names_reports_the_unknown_component() {
        let err = CompileOptions::from_names("rmsprop", "mse", &[]).unwrap_err();
        assert!(matches!(
            err,
            NnError::UnknownName { kind: "optimizer", ref name } if name == "rmsprop"
        ));

        let err = CompileOptions::from_names("sgd", "hinge", &[]).unwrap_err();
        assert!(matches!(err, NnError::UnknownName { kind: "loss", .. }));
    }
}
