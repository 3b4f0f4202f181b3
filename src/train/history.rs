use serde::{Serialize, Deserialize};

use crate::train::epoch_stats::EpochStats;

/// Everything `fit` recorded, one entry per completed epoch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    pub epochs: Vec<EpochStats>,
}

impl History {
    pub fn push(&mut self, stats: EpochStats) {
        self.epochs.push(stats);
    }

    pub fn losses(&self) -> Vec<f64> {
        self.epochs.iter().map(|s| s.loss).collect()
    }

    pub fn accuracies(&self) -> Vec<f64> {
        self.epochs.iter().filter_map(|s| s.accuracy).collect()
    }

    pub fn last(&self) -> Option<&EpochStats> {
        self.epochs.last()
    }

    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }
}
