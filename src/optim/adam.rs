use std::collections::HashMap;

use super::Optimizer;
use crate::error::{NnError, Result};

/// First and second moment estimates for one parameter tensor.
#[derive(Debug, Clone)]
struct Moments {
    v: Box<[f64]>,
    s: Box<[f64]>,
    beta1_t: f64,
    beta2_t: f64,
}

impl Moments {
    fn new(len: usize) -> Self {
        Self {
            v: vec![0.; len].into_boxed_slice(),
            s: vec![0.; len].into_boxed_slice(),
            beta1_t: 1.,
            beta2_t: 1.,
        }
    }
}

/// Adam with bias-corrected step size. Moments are allocated lazily, one
/// entry per slot, the first time a slot is updated.
#[derive(Debug, Clone)]
pub struct Adam {
    learning_rate: f64,
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    moments: HashMap<usize, Moments>,
}

impl Adam {
    pub const DEFAULT_LEARNING_RATE: f64 = 0.001;
    pub const DEFAULT_BETA1: f64 = 0.9;
    pub const DEFAULT_BETA2: f64 = 0.999;
    pub const DEFAULT_EPSILON: f64 = 1e-7;

    /// Creates a new `Adam` optimizer.
    ///
    /// # Arguments
    /// * `learning_rate` - The coefficient that modulates the size of each update.
    /// * `beta1`, `beta2`, `epsilon` - Hyperparameters to the optimization algorithm.
    pub fn new(learning_rate: f64, beta1: f64, beta2: f64, epsilon: f64) -> Self {
        Self {
            learning_rate,
            beta1,
            beta2,
            epsilon,
            moments: HashMap::new(),
        }
    }
}

impl Default for Adam {
    fn default() -> Self {
        Adam::new(
            Self::DEFAULT_LEARNING_RATE,
            Self::DEFAULT_BETA1,
            Self::DEFAULT_BETA2,
            Self::DEFAULT_EPSILON,
        )
    }
}

impl Optimizer for Adam {
    fn update_params(&mut self, slot: usize, grad: &[f64], params: &mut [f64]) -> Result<()> {
        if grad.len() != params.len() {
            return Err(NnError::ShapeMismatch {
                what: "gradient",
                got: grad.len(),
                expected: params.len(),
            });
        }

        let Self {
            learning_rate: lr,
            beta1: b1,
            beta2: b2,
            epsilon: eps,
            ..
        } = *self;

        let m = self
            .moments
            .entry(slot)
            .or_insert_with(|| Moments::new(params.len()));
        if m.v.len() != params.len() {
            return Err(NnError::ShapeMismatch {
                what: "optimizer slot",
                got: params.len(),
                expected: m.v.len(),
            });
        }

        m.beta1_t *= b1;
        m.beta2_t *= b2;

        let bc1 = 1. - m.beta1_t;
        let bc2 = 1. - m.beta2_t;
        let step_size = lr * (bc2.sqrt() / bc1);

        params
            .iter_mut()
            .zip(grad)
            .zip(m.v.iter_mut())
            .zip(m.s.iter_mut())
            .for_each(|(((p, g), v), s)| {
                *v = b1 * *v + (1. - b1) * g;
                *s = b2 * *s + (1. - b2) * g.powi(2);
                *p -= step_size * *v / (s.sqrt() + eps);
            });

        Ok(())
    }
}
