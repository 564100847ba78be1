//! Unit-root testing and stationarity assessment.
//!
//! # Example
//!
//! ```
//! use arima_pipeline::core::Series;
//! use arima_pipeline::validation::{StationarityAnalyzer, Verdict};
//!
//! let series = Series::from_values(vec![
//!     100.0, 101.0, 99.0, 102.0, 98.0, 103.0, 97.0, 104.0, 96.0, 105.0,
//! ]);
//! let result = StationarityAnalyzer::default().assess(&series, "ALT");
//! assert_ne!(result.verdict, Verdict::CannotTest);
//! assert!(result.p_value.is_some());
//! ```

pub mod adf;
pub mod mackinnon;
pub mod stationarity;

pub use adf::{adf_test, AdfResult};
pub use mackinnon::CriticalValues;
pub use stationarity::{StationarityAnalyzer, StationarityConfig, StationarityResult, Verdict};
