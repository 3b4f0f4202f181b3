use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::ExperimentConfig;
use crate::data::synthetic::Dataset;
use crate::error::{NnError, Result};
use crate::network::factory::create_model_seeded;
use crate::train::evaluation::Evaluation;
use crate::train::history::History;
use crate::train::train_config::FitConfig;

/// Outcome of one `run`.
#[derive(Debug, Clone)]
pub struct Report {
    pub history: History,
    pub evaluation: Evaluation,
}

impl Report {
    pub fn test_accuracy(&self) -> Result<f64> {
        self.evaluation
            .accuracy
            .ok_or(NnError::InvalidInput("model was not compiled with the accuracy metric"))
    }
}

/// Generates random train/test sets, trains the default classifier on the
/// first and scores it on the second.
pub fn run(config: &ExperimentConfig) -> Result<Report> {
    config.validate()?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let train = Dataset::synthetic(config.train_samples, config.features, &mut rng);
    let mut model = create_model_seeded(config.features, rng.gen())?;
    info!(
        "training on {} samples x {} features ({} parameters)",
        train.len(),
        config.features,
        model.param_count()
    );

    let history = model.fit(
        &train.features,
        &train.labels,
        &FitConfig::new(config.epochs, config.batch_size),
    )?;

    let test = Dataset::synthetic(config.test_samples, config.features, &mut rng);
    let evaluation = model.evaluate(&test.features, &test.labels)?;
    info!("test loss {:.4} on {} samples", evaluation.loss, test.len());

    Ok(Report { history, evaluation })
}

/// The single line the binary prints.
pub fn accuracy_line(accuracy: f64) -> String {
    format!("Test accuracy: {accuracy:.4}")
}
