use std::fmt::Write as _;
use std::path::Path;

use log::debug;
use rand::{rngs::StdRng, SeedableRng};

use crate::activation::activation::ActivationFunction;
use crate::error::{NnError, Result};
use crate::layers::dense::Dense;
use crate::math::matrix::Matrix;
use crate::network::spec::{CompileOptions, SavedModel};
use crate::optim::Optimizer;
use crate::train::evaluation::{self, Evaluation};
use crate::train::history::History;
use crate::train::loop_fn::train_loop;
use crate::train::train_config::FitConfig;

#[derive(Debug)]
struct Compiled {
    options: CompileOptions,
    optimizer: Box<dyn Optimizer>,
}

/// A linear stack of dense layers behind a declared input width.
///
/// Lifecycle: declare the input, add layers, compile, then `fit`, `evaluate`
/// and `predict`. Each layer's input width is the previous layer's unit count,
/// so the stack is shape-consistent by construction.
#[derive(Debug)]
pub struct Sequential {
    input_size: Option<usize>,
    layers: Vec<Dense>,
    compiled: Option<Compiled>,
    rng: StdRng,
}

impl Sequential {
    /// Empty model seeded from OS entropy.
    pub fn new() -> Sequential {
        Sequential::from_rng(StdRng::from_entropy())
    }

    /// Empty model whose weight initialization and shuffling are reproducible.
    pub fn with_seed(seed: u64) -> Sequential {
        Sequential::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Sequential {
        Sequential {
            input_size: None,
            layers: Vec::new(),
            compiled: None,
            rng,
        }
    }

    /// Declares the input layer. Must be called once, before any `add_dense`.
    pub fn input(&mut self, size: usize) -> Result<()> {
        if size == 0 {
            return Err(NnError::InvalidInput("input size must be at least 1"));
        }
        if self.input_size.is_some() {
            return Err(NnError::InvalidInput("input layer already declared"));
        }
        self.input_size = Some(size);
        Ok(())
    }

    /// Appends a dense layer fed by the current output width.
    pub fn add_dense(&mut self, units: usize, activation: ActivationFunction) -> Result<()> {
        if units == 0 {
            return Err(NnError::InvalidInput("a dense layer needs at least 1 unit"));
        }
        let input_size = self
            .output_size()
            .ok_or(NnError::InvalidInput("declare the input layer before adding layers"))?;
        self.layers.push(Dense::new(units, input_size, activation, &mut self.rng));
        Ok(())
    }

    /// Selects optimizer, loss and metrics by name.
    pub fn compile(&mut self, optimizer: &str, loss: &str, metrics: &[&str]) -> Result<()> {
        self.compile_with(CompileOptions::from_names(optimizer, loss, metrics)?);
        Ok(())
    }

    /// Installs `options` with a fresh optimizer. Recompiling resets optimizer state.
    pub fn compile_with(&mut self, options: CompileOptions) {
        debug!(
            "compiled with optimizer={} loss={} metrics={:?}",
            options.optimizer.name(),
            options.loss.name(),
            options.metrics
        );
        let optimizer = options.optimizer.build();
        self.compiled = Some(Compiled { options, optimizer });
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled.is_some()
    }

    pub fn compile_options(&self) -> Option<&CompileOptions> {
        self.compiled.as_ref().map(|c| &c.options)
    }

    pub fn layers(&self) -> &[Dense] {
        &self.layers
    }

    pub fn input_size(&self) -> Option<usize> {
        self.input_size
    }

    /// Width of the last layer, or of the input when no layer was added yet.
    pub fn output_size(&self) -> Option<usize> {
        self.layers.last().map(|l| l.units).or(self.input_size)
    }

    /// Read-only forward pass: `(batch, input_size)` → `(batch, output_size)`.
    pub fn predict(&self, inputs: &Matrix) -> Result<Matrix> {
        self.check_inputs(inputs)?;
        let mut current = inputs.clone();
        for layer in &self.layers {
            current = layer.infer(&current);
        }
        Ok(current)
    }

    /// Trains in place; see [`train_loop`].
    pub fn fit(&mut self, inputs: &Matrix, labels: &Matrix, config: &FitConfig) -> Result<History> {
        train_loop(self, inputs, labels, config)
    }

    /// Scores the model without modifying it.
    pub fn evaluate(&self, inputs: &Matrix, labels: &Matrix) -> Result<Evaluation> {
        evaluation::evaluate(self, inputs, labels)
    }

    pub fn param_count(&self) -> usize {
        self.layers.iter().map(Dense::param_count).sum()
    }

    /// Flattened copy of every trainable value, layer by layer, weights before biases.
    pub fn parameters(&self) -> Vec<f64> {
        self.layers
            .iter()
            .flat_map(|l| l.weights.as_slice().iter().chain(l.biases.as_slice()))
            .copied()
            .collect()
    }

    /// Layer table with output shapes and parameter counts.
    pub fn summary(&self) -> String {
        let rule = "=".repeat(58);
        let mut out = String::new();
        let _ = writeln!(out, "{:<24}{:<20}{:>14}", "Layer (type)", "Output Shape", "Param #");
        let _ = writeln!(out, "{rule}");
        for (i, layer) in self.layers.iter().enumerate() {
            let name = if i == 0 { "dense".to_string() } else { format!("dense_{i}") };
            let _ = writeln!(
                out,
                "{:<24}{:<20}{:>14}",
                format!("{name} (Dense, {})", layer.activator.name()),
                format!("(None, {})", layer.units),
                layer.param_count()
            );
        }
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "Total params: {}", self.param_count());
        out
    }

    /// Writes architecture, weights and compile options as pretty-printed JSON.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let input_size = self
            .input_size
            .ok_or(NnError::InvalidInput("cannot save a model without an input layer"))?;
        SavedModel {
            input_size,
            layers: self.layers.clone(),
            compile: self.compile_options().cloned(),
        }
        .save_json(path)
    }

    /// Restores a model written by `save_json`. A compiled model comes back
    /// compiled, with a fresh optimizer.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Sequential> {
        Sequential::from_saved(SavedModel::load_json(path)?)
    }

    /// Rebuilds a model from its saved form, checking the layer chain.
    pub fn from_saved(saved: SavedModel) -> Result<Sequential> {
        let mut model = Sequential::new();
        model.input(saved.input_size)?;
        for layer in saved.layers {
            let expected = model.output_size().unwrap_or(saved.input_size);
            if layer.input_size != expected {
                return Err(NnError::ShapeMismatch {
                    what: "saved layer input",
                    got: layer.input_size,
                    expected,
                });
            }
            let weights_shape = (layer.weights.rows, layer.weights.cols);
            if weights_shape != (layer.input_size, layer.units)
                || layer.weights.len() != layer.input_size * layer.units
            {
                return Err(NnError::ShapeMismatch {
                    what: "saved layer weights",
                    got: layer.weights.len(),
                    expected: layer.input_size * layer.units,
                });
            }
            if (layer.biases.rows, layer.biases.cols) != (1, layer.units)
                || layer.biases.len() != layer.units
            {
                return Err(NnError::ShapeMismatch {
                    what: "saved layer biases",
                    got: layer.biases.len(),
                    expected: layer.units,
                });
            }
            model.layers.push(layer);
        }
        if let Some(options) = saved.compile {
            model.compile_with(options);
        }
        Ok(model)
    }

    // ---------------------------------------------------------------------
    // Training internals
    // ---------------------------------------------------------------------

    /// Validates a feature matrix against the declared input width.
    fn check_inputs(&self, inputs: &Matrix) -> Result<()> {
        let expected = self
            .input_size
            .ok_or(NnError::InvalidInput("model has no input layer"))?;
        if self.layers.is_empty() {
            return Err(NnError::InvalidInput("model has no layers"));
        }
        if inputs.cols != expected {
            return Err(NnError::ShapeMismatch {
                what: "input features",
                got: inputs.cols,
                expected,
            });
        }
        Ok(())
    }

    /// Validates features and labels against the model and each other.
    pub(crate) fn check_labelled(&self, inputs: &Matrix, labels: &Matrix) -> Result<()> {
        self.check_inputs(inputs)?;
        if labels.rows != inputs.rows {
            return Err(NnError::ShapeMismatch {
                what: "label rows",
                got: labels.rows,
                expected: inputs.rows,
            });
        }
        let outputs = self.output_size().unwrap_or_default();
        if labels.cols != outputs {
            return Err(NnError::ShapeMismatch {
                what: "label columns",
                got: labels.cols,
                expected: outputs,
            });
        }
        Ok(())
    }

    pub(crate) fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Forward pass that caches activations in each layer for backprop.
    pub(crate) fn forward_train(&mut self, inputs: &Matrix) -> Matrix {
        let mut current = inputs.clone();
        for layer in &mut self.layers {
            current = layer.forward(&current);
        }
        current
    }

    /// Backpropagates ∂L/∂output through the stack and applies one optimizer
    /// step per parameter tensor. Slots are `2i` for weights, `2i + 1` for biases.
    pub(crate) fn apply_gradients(&mut self, grad_output: &Matrix) -> Result<()> {
        let compiled = self.compiled.as_mut().ok_or(NnError::NotCompiled)?;
        let mut delta = grad_output.clone();

        for (i, layer) in self.layers.iter_mut().enumerate().rev() {
            // Gradients (and the propagated delta) use the pre-update weights.
            let grads = layer.backward(&delta);
            compiled
                .optimizer
                .update_params(2 * i, grads.weights.as_slice(), layer.weights.as_mut_slice())?;
            compiled
                .optimizer
                .update_params(2 * i + 1, grads.biases.as_slice(), layer.biases.as_mut_slice())?;
            delta = grads.inputs;
        }

        Ok(())
    }
}

impl Default for Sequential {
    fn default() -> Self {
        Sequential::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::synthetic::Dataset;
    use crate::network::factory::create_model_seeded;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("binary_mlp_{}_{name}.json", std::process::id()))
    }

    #[test]
    fn test_layers_require_input_first() {
        let mut model = Sequential::with_seed(0);
        assert!(matches!(
            model.add_dense(4, ActivationFunction::ReLU),
            Err(NnError::InvalidInput(_))
        ));
        model.input(3).unwrap();
        assert!(model.input(3).is_err());
        assert!(model.add_dense(0, ActivationFunction::ReLU).is_err());
        model.add_dense(4, ActivationFunction::ReLU).unwrap();
        model.add_dense(2, ActivationFunction::Sigmoid).unwrap();
        assert_eq!(model.layers()[1].input_size, 4);
        assert_eq!(model.output_size(), Some(2));
    }

    #[test]
    fn test_predict_shape_and_range_for_any_width() {
        let mut rng = StdRng::seed_from_u64(5);
        for width in [1, 3, 10, 32] {
            let model = create_model_seeded(width, 42).unwrap();
            let x = Matrix::random_uniform(7, width, 0.0, 1.0, &mut rng);
            let out = model.predict(&x).unwrap();
            assert_eq!((out.rows, out.cols), (7, 1));
            assert!(out.data.iter().all(|&p| p > 0.0 && p < 1.0));
        }
    }

    #[test]
    fn test_predict_rejects_wrong_width() {
        let model = create_model_seeded(10, 1).unwrap();
        let err = model.predict(&Matrix::zeros(2, 9)).unwrap_err();
        assert!(matches!(err, NnError::ShapeMismatch { got: 9, expected: 10, .. }));
    }

    #[test]
    fn test_uncompiled_model_cannot_fit_or_evaluate() {
        let mut model = Sequential::with_seed(0);
        model.input(2).unwrap();
        model.add_dense(1, ActivationFunction::Sigmoid).unwrap();
        let x = Matrix::zeros(4, 2);
        let y = Matrix::zeros(4, 1);

        assert!(matches!(model.fit(&x, &y, &FitConfig::new(1, 2)), Err(NnError::NotCompiled)));
        assert!(matches!(model.evaluate(&x, &y), Err(NnError::NotCompiled)));
        assert!(model.predict(&x).is_ok());
    }

    #[test]
    fn test_fit_validates_data() {
        let mut model = create_model_seeded(3, 1).unwrap();
        let x = Matrix::zeros(4, 3);

        let err = model.fit(&x, &Matrix::zeros(5, 1), &FitConfig::new(1, 2)).unwrap_err();
        assert!(matches!(err, NnError::ShapeMismatch { what: "label rows", .. }));

        let err = model.fit(&x, &Matrix::zeros(4, 2), &FitConfig::new(1, 2)).unwrap_err();
        assert!(matches!(err, NnError::ShapeMismatch { what: "label columns", .. }));

        let err = model.fit(&x, &Matrix::zeros(4, 1), &FitConfig::new(1, 0)).unwrap_err();
        assert!(matches!(err, NnError::InvalidInput(_)));

        let empty = (Matrix::zeros(0, 3), Matrix::zeros(0, 1));
        let err = model.fit(&empty.0, &empty.1, &FitConfig::new(1, 2)).unwrap_err();
        assert!(matches!(err, NnError::InvalidInput(_)));
    }

    #[test]
    fn test_fit_updates_parameters_and_records_history() {
        let mut rng = StdRng::seed_from_u64(8);
        let train = Dataset::synthetic(100, 10, &mut rng);
        let mut model = create_model_seeded(10, 8).unwrap();
        let before = model.parameters();

        let history = model.fit(&train.features, &train.labels, &FitConfig::new(10, 8)).unwrap();

        assert_eq!(history.len(), 10);
        assert_eq!(history.epochs[0].epoch, 1);
        assert_eq!(history.last().unwrap().total_epochs, 10);
        assert!(history.losses().iter().all(|l| l.is_finite() && *l >= 0.0));
        assert_eq!(history.accuracies().len(), 10);
        assert!(history.accuracies().iter().all(|a| (0.0..=1.0).contains(a)));
        assert_ne!(model.parameters(), before);
    }

    #[test]
    fn test_zero_epochs_is_a_no_op() {
        let mut rng = StdRng::seed_from_u64(2);
        let train = Dataset::synthetic(10, 4, &mut rng);
        let mut model = create_model_seeded(4, 2).unwrap();
        let before = model.parameters();

        let history = model.fit(&train.features, &train.labels, &FitConfig::new(0, 8)).unwrap();
        assert!(history.is_empty());
        assert_eq!(model.parameters(), before);
    }

    #[test]
    fn test_loss_decreases_on_learnable_data() {
        // Label is 1 when the first feature exceeds 0.5.
        let mut rng = StdRng::seed_from_u64(21);
        let x = Matrix::random_uniform(64, 2, 0.0, 1.0, &mut rng);
        let y = Matrix::column(
            (0..64).map(|i| if x.get(i, 0) > 0.5 { 1.0 } else { 0.0 }).collect(),
        );

        let mut model = create_model_seeded(2, 21).unwrap();
        let history = model.fit(&x, &y, &FitConfig::new(60, 8)).unwrap();

        let losses = history.losses();
        assert!(losses[losses.len() - 1] < losses[0] * 0.9, "losses: {losses:?}");
    }

    #[test]
    fn test_evaluate_is_read_only() {
        let mut rng = StdRng::seed_from_u64(4);
        let test = Dataset::synthetic(20, 10, &mut rng);
        let model = create_model_seeded(10, 4).unwrap();
        let before = model.parameters();

        let eval = model.evaluate(&test.features, &test.labels).unwrap();
        assert!(eval.loss.is_finite() && eval.loss >= 0.0);
        let acc = eval.accuracy.unwrap();
        assert!((0.0..=1.0).contains(&acc));
        assert_eq!(model.parameters(), before);
    }

    #[test]
    fn test_summary_lists_every_layer() {
        let summary = create_model_seeded(10, 0).unwrap().summary();
        assert!(summary.contains("dense (Dense, relu)"));
        assert!(summary.contains("dense_2 (Dense, sigmoid)"));
        assert!(summary.contains("(None, 64)"));
        assert!(summary.contains("Total params: 4929"));
    }

    #[test]
    fn test_save_and_load_preserves_predictions() {
        let path = temp_path("roundtrip");
        let model = create_model_seeded(5, 13).unwrap();
        model.save_json(&path).unwrap();

        let loaded = Sequential::load_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let x = Matrix::random_uniform(3, 5, 0.0, 1.0, &mut StdRng::seed_from_u64(1));
        assert_eq!(loaded.predict(&x).unwrap(), model.predict(&x).unwrap());
        assert_eq!(loaded.compile_options(), model.compile_options());
    }

    #[test]
    fn test_load_rejects_broken_layer_chain() {
        let model = create_model_seeded(5, 13).unwrap();
        let mut saved = SavedModel {
            input_size: 5,
            layers: model.layers().to_vec(),
            compile: None,
        };
        saved.layers.remove(0);
        let err = Sequential::from_saved(saved).unwrap_err();
        assert!(matches!(
            err,
            NnError::ShapeMismatch { what: "saved layer input", got: 64, expected: 5 }
        ));
    }

    #[test]
    fn test_load_rejects_truncated_weights() {
        let model = create_model_seeded(3, 13).unwrap();
        let mut saved = SavedModel {
            input_size: 3,
            layers: model.layers().to_vec(),
            compile: None,
        };
        saved.layers[0].weights.data.truncate(5);

        let err = Sequential::from_saved(saved).unwrap_err();
        assert!(matches!(
            err,
            NnError::ShapeMismatch { what: "saved layer weights", got: 5, expected: 192 }
        ));
    }

    #[test]
    fn test_load_rejects_corrupt_matrix_in_json() {
        let path = temp_path("corrupt");
        let model = create_model_seeded(3, 13).unwrap();
        model.save_json(&path).unwrap();

        let mut json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        json["layers"][0]["weights"]["data"] = serde_json::json!([0.1, 0.2, 0.3, 0.4, 0.5]);
        std::fs::write(&path, json.to_string()).unwrap();

        let result = Sequential::load_json(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(NnError::Json(_))));
    }

    #[test]
    fn test_layer_chain_is_consistent() {
        let model = create_model_seeded(7, 3).unwrap();
        let layers = model.layers();
        assert_eq!(layers[0].input_size, 7);
        for pair in layers.windows(2) {
            assert_eq!(pair[1].input_size, pair[0].units);
        }
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Sequential::load_json(temp_path("does_not_exist")).unwrap_err();
        assert!(matches!(err, NnError::Io(_)));
    }
}
