use std::time::Instant;

use log::{debug, info};
use rand::seq::SliceRandom;

use crate::error::{NnError, Result};
use crate::math::matrix::Matrix;
use crate::metrics::Metric;
use crate::network::network::Sequential;
use crate::train::epoch_stats::EpochStats;
use crate::train::history::History;
use crate::train::train_config::FitConfig;

/// Trains `model` for `config.epochs` epochs of mini-batch gradient descent
/// and returns the per-epoch history.
///
/// # Arguments
/// - `model`  — compiled model; parameters and optimizer state are updated in place
/// - `inputs` — training samples, one per row, `input_size` columns
/// - `labels` — targets, one row per sample, `output_size` columns
/// - `config` — epochs, batch size and shuffling
///
/// # Errors
/// `NotCompiled` if `compile` was never called, `ShapeMismatch` if the data
/// does not fit the model, `InvalidInput` for empty data or `batch_size == 0`.
pub fn train_loop(
    model: &mut Sequential,
    inputs: &Matrix,
    labels: &Matrix,
    config: &FitConfig,
) -> Result<History> {
    let options = model.compile_options().ok_or(NnError::NotCompiled)?.clone();
    model.check_labelled(inputs, labels)?;
    if inputs.rows == 0 {
        return Err(NnError::InvalidInput("training data is empty"));
    }
    if config.batch_size == 0 {
        return Err(NnError::InvalidInput("batch_size must be at least 1"));
    }

    let n = inputs.rows;
    let track_accuracy = options.metrics.contains(&Metric::Accuracy);
    let mut history = History::default();
    debug!(
        "fitting {n} samples for {} epochs, batch size {}, {} batches per epoch",
        config.epochs,
        config.batch_size,
        n.div_ceil(config.batch_size)
    );

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        let mut indices: Vec<usize> = (0..n).collect();
        if config.shuffle {
            indices.shuffle(model.rng_mut());
        }

        let mut total_loss = 0.0;
        let mut total_accuracy = 0.0;

        for batch in indices.chunks(config.batch_size) {
            let x = inputs.select_rows(batch);
            let y = labels.select_rows(batch);
            let weight = batch.len() as f64;

            let output = model.forward_train(&x);
            total_loss += options.loss.loss(&output, &y) * weight;
            if track_accuracy {
                total_accuracy += Metric::Accuracy.compute(&output, &y) * weight;
            }

            let grad = options.loss.derivative(&output, &y);
            model.apply_gradients(&grad)?;
        }

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            loss: total_loss / n as f64,
            accuracy: track_accuracy.then(|| total_accuracy / n as f64),
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        info!("{stats}");
        history.push(stats);
    }

    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    use crate::data::synthetic::Dataset;
    use crate::loss::loss_type::LossType;
    use crate::network::factory::create_model_seeded;
    use crate::network::spec::CompileOptions;
    use crate::optim::optimizer_kind::OptimizerKind;

    fn frozen_model(input_size: usize) -> Sequential {
        let mut model = create_model_seeded(input_size, 17).unwrap();
        model.compile_with(CompileOptions {
            optimizer: OptimizerKind::Sgd { learning_rate: 0.0 },
            loss: LossType::BinaryCrossEntropy,
            metrics: vec![Metric::Accuracy],
        });
        model
    }

    #[test]
    fn test_epoch_stats_weight_short_last_batch() {
        // 100 samples in batches of 8 leave a final batch of 4. With a zero
        // learning rate the weighted epoch mean equals the full-set score.
        let mut rng = StdRng::seed_from_u64(17);
        let train = Dataset::synthetic(100, 10, &mut rng);

        for shuffle in [false, true] {
            let mut model = frozen_model(10);
            let config = FitConfig { epochs: 1, batch_size: 8, shuffle };
            let history = train_loop(&mut model, &train.features, &train.labels, &config).unwrap();
            let eval = model.evaluate(&train.features, &train.labels).unwrap();

            let stats = &history.epochs[0];
            assert!(
                (stats.loss - eval.loss).abs() < 1e-12,
                "shuffle={shuffle}: {stats:?} vs {eval:?}"
            );
            let (acc, expected) = (stats.accuracy.unwrap(), eval.accuracy.unwrap());
            assert!((acc - expected).abs() < 1e-12, "shuffle={shuffle}: {acc} vs {expected}");
        }
    }

    #[test]
    fn test_epoch_stats_without_accuracy_metric() {
        let mut rng = StdRng::seed_from_u64(5);
        let train = Dataset::synthetic(12, 3, &mut rng);
        let mut model = create_model_seeded(3, 5).unwrap();
        model.compile("sgd", "binary_crossentropy", &[]).unwrap();

        let config = FitConfig::new(2, 5);
        let history = train_loop(&mut model, &train.features, &train.labels, &config).unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.epochs.iter().all(|s| s.accuracy.is_none()));
    }
}
