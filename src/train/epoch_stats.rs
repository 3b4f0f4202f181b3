use serde::{Serialize, Deserialize};
use std::fmt;

/// Per-epoch training statistics emitted by `train_loop`.
///
/// Loss and accuracy are sample-weighted means of the per-batch values, each
/// measured before that batch's parameter update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    pub loss: f64,
    /// Only set when the model was compiled with the accuracy metric.
    pub accuracy: Option<f64>,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}

impl fmt::Display for EpochStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "epoch {}/{} - {}ms - loss: {:.4}",
            self.epoch, self.total_epochs, self.elapsed_ms, self.loss
        )?;
        if let Some(acc) = self.accuracy {
            write!(f, " - accuracy: {acc:.4}")?;
        }
        Ok(())
    }
}
