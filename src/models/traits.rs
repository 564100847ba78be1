//! Forecaster trait defining the common interface for models.

use crate::core::{Forecast, Series};
use crate::error::Result;

/// Common interface for forecasting models.
///
/// This trait is object-safe and can be used with `Box<dyn Forecaster>`.
pub trait Forecaster {
    /// Fit the model to the series. Missing observations are skipped.
    fn fit(&mut self, series: &Series) -> Result<()>;

    /// Predict the `horizon` steps after the last observed value.
    fn predict(&self, horizon: usize) -> Result<Forecast>;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool;

    /// Get the model name.
    fn name(&self) -> &str;
}
