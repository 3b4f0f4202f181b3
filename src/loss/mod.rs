pub mod bce;
pub mod mse;
pub mod loss_type;

pub use bce::BceLoss;
pub use mse::MseLoss;
pub use loss_type::LossType;
