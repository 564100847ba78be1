//! # arima-pipeline
//!
//! Stationarity testing, ARIMA order selection and short-horizon forecasting
//! for univariate series.
//!
//! Three stages, each usable on its own:
//! - [`validation::StationarityAnalyzer`] runs the Augmented Dickey-Fuller test
//! - [`models::arima::OrderSelector`] proposes (p, d, q) by differencing until
//!   stationary and reading cut-offs from the ACF and PACF
//! - [`models::arima::ArimaForecaster`] fits ARIMA(p, d, q) and forecasts a week ahead
//!
//! [`pipeline::Pipeline`] chains them over a [`core::Dataset`]. Progress and
//! failures are reported through an injected [`observe::AnalysisObserver`],
//! which emits `tracing` events by default.
//!
//! # Example
//!
//! ```
//! use arima_pipeline::prelude::*;
//!
//! let values: Vec<f64> = (0..80)
//!     .map(|i| 20.0 + (i as f64 * 0.9).sin() * 3.0 + ((i * 7919) % 101) as f64 / 50.0)
//!     .collect();
//! let report = Pipeline::default().analyze(&Series::from_values(values), "DEMO", &OrderOverrides::default());
//!
//! let forecast = report.forecast.unwrap().forecast;
//! assert_eq!(forecast.horizon(), 7);
//! assert_eq!(forecast.labels()[0].to_string(), "Day +1");
//! ```

#![allow(clippy::needless_range_loop)]

pub mod core;
pub mod error;
pub mod features;
pub mod models;
pub mod observe;
pub mod pipeline;
pub mod summary;
pub mod utils;
pub mod validation;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::core::{Dataset, Forecast, ForecastWithHistory, Series, TimeLabel};
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::arima::{ArimaForecaster, OrderProposal, OrderSelector};
    pub use crate::models::Forecaster;
    pub use crate::observe::{AnalysisEvent, AnalysisObserver, NullObserver, TracingObserver};
    pub use crate::pipeline::{OrderOverrides, Pipeline, PipelineConfig, SeriesReport};
    pub use crate::validation::{StationarityAnalyzer, StationarityResult, Verdict};
}
