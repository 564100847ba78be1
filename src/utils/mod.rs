//! Numerical utilities shared by the tests and models.

pub mod ols;
pub mod optimization;
pub mod stats;

pub use ols::{ols_fit, OlsFit};
pub use optimization::{nelder_mead, NelderMeadConfig, NelderMeadResult};
pub use stats::{mean, normal_cdf, std_dev, variance};
