use super::Optimizer;
use crate::error::{NnError, Result};

/// Plain stochastic gradient descent: `p -= lr * g`.
#[derive(Debug, Clone)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub const DEFAULT_LEARNING_RATE: f64 = 0.01;

    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }
}

impl Optimizer for Sgd {
    fn update_params(&mut self, _slot: usize, grad: &[f64], params: &mut [f64]) -> Result<()> {
        if grad.len() != params.len() {
            return Err(NnError::ShapeMismatch {
                what: "gradient",
                got: grad.len(),
                expected: params.len(),
            });
        }
        let lr = self.learning_rate;
        params.iter_mut().zip(grad).for_each(|(p, g)| *p -= lr * g);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sgd_step() {
        let mut sgd = Sgd::new(0.5);
        let mut params = [1.0, -1.0];
        sgd.update_params(0, &[2.0, -4.0], &mut params).unwrap();
        assert_eq!(params, [0.0, 1.0]);
    }

    #[test]
    fn test_sgd_rejects_mismatched_gradient() {
        let mut sgd = Sgd::new(0.1);
        let mut params = [0.0; 3];
        assert!(sgd.update_params(0, &[1.0], &mut params).is_err());
    }
}
