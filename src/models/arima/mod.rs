//! ARIMA (Autoregressive Integrated Moving Average) models.
//!
//! This module provides:
//! - ARIMA models with (p, d, q) specifications fitted by conditional least squares
//! - Heuristic order selection from unit-root tests and correlograms
//! - A forecaster front end with input guarding and order validation

mod diff;
mod forecaster;
mod model;
mod selection;

pub use diff::{difference, integrate};
pub use forecaster::{
    validate_orders, ArimaForecaster, ForecasterConfig, MAX_ARMA_ORDER, MAX_DIFF_ORDER,
};
pub use model::{Arima, ArimaOrder};
pub use selection::{Correlogram, OrderProposal, OrderSelectionConfig, OrderSelector};
