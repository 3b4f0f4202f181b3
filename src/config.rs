use serde::{Serialize, Deserialize};

use crate::error::{NnError, Result};

/// Sizes and hyperparameters of one train/evaluate run.
///
/// `Default` is the fixed setup the binary runs: 100 training and 20 test
/// samples of 10 features, 10 epochs with batch size 8, unseeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub train_samples: usize,
    pub test_samples: usize,
    pub features: usize,
    pub epochs: usize,
    pub batch_size: usize,
    /// Seeds data generation, weight initialization and shuffling. `None`
    /// draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            train_samples: 100,
            test_samples: 20,
            features: 10,
            epochs: 10,
            batch_size: 8,
            seed: None,
        }
    }
}

impl ExperimentConfig {
    pub fn with_seed(seed: u64) -> Self {
        ExperimentConfig {
            seed: Some(seed),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.train_samples == 0 {
            return Err(NnError::InvalidInput("train_samples must be at least 1"));
        }
        if self.test_samples == 0 {
            return Err(NnError::InvalidInput("test_samples must be at least 1"));
        }
        if self.features == 0 {
            return Err(NnError::InvalidInput("features must be at least 1"));
        }
        if self.batch_size == 0 {
            return Err(NnError::InvalidInput("batch_size must be at least 1"));
        }
        Ok(())
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a config from JSON; missing fields take their defaults.
    pub fn load_json(path: impl AsRef<std::path::Path>) -> Result<ExperimentConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: ExperimentConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}
