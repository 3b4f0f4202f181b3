use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

/// Fully connected layer: `a = f(x · W + b)` over a batch of rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dense {
    pub units: usize,
    pub input_size: usize,
    /// Shape `(input_size, units)`.
    pub weights: Matrix,
    /// Shape `(1, units)`.
    pub biases: Matrix,
    pub activator: ActivationFunction,
    #[serde(skip)]
    inputs: Matrix,
    // pre-activation values (z = xW + b) needed for correct derivative
    #[serde(skip)]
    pre_neurons: Matrix,
}

/// Gradients produced by one backward pass through a `Dense` layer.
#[derive(Debug, Clone)]
pub struct DenseGrads {
    pub weights: Matrix,
    pub biases: Matrix,
    /// ∂L/∂x, the delta handed to the previous layer.
    pub inputs: Matrix,
}

impl Dense {
    /// Glorot-uniform weights, zero biases.
    pub fn new<R: Rng + ?Sized>(
        units: usize,
        input_size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Dense {
        Dense {
            units,
            input_size,
            weights: Matrix::glorot_uniform(input_size, units, rng),
            biases: Matrix::zeros(1, units),
            activator: activation,
            inputs: Matrix::default(),
            pre_neurons: Matrix::default(),
        }
    }

    /// Training forward pass; caches the input and pre-activation for `backward`.
    pub fn forward(&mut self, input: &Matrix) -> Matrix {
        let z = (input * &self.weights).add_row(&self.biases);
        let a = z.map(|x| self.activator.function(x));
        self.inputs = input.clone();
        self.pre_neurons = z;
        a
    }

    /// Read-only forward pass used by `predict` and `evaluate`.
    pub fn infer(&self, input: &Matrix) -> Matrix {
        (input * &self.weights)
            .add_row(&self.biases)
            .map(|x| self.activator.function(x))
    }

    /// `grad_output` is ∂L/∂a for this layer's last `forward` batch.
    pub fn backward(&self, grad_output: &Matrix) -> DenseGrads {
        let act_derivative = self.pre_neurons.map(|x| self.activator.derivative(x));
        // δ = error ⊙ σ'(z)
        let delta = grad_output.hadamard(&act_derivative);

        DenseGrads {
            weights: &self.inputs.transpose() * &delta,
            biases: delta.sum_rows(),
            inputs: &delta * &self.weights.transpose(),
        }
    }

    pub fn param_count(&self) -> usize {
        self.weights.len() + self.biases.len()
    }
}
