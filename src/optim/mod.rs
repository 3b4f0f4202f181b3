pub mod adam;
pub mod optimizer_kind;
pub mod sgd;

pub use adam::Adam;
pub use optimizer_kind::OptimizerKind;
pub use sgd::Sgd;

use crate::error::Result;

/// Updates parameter tensors in place from their gradients.
///
/// Each trainable tensor is identified by a `slot` so stateful optimizers can
/// keep one set of moments per tensor.
pub trait Optimizer: std::fmt::Debug {
    fn update_params(&mut self, slot: usize, grad: &[f64], params: &mut [f64]) -> Result<()>;
}
