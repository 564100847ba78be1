//! Time series features used for order identification.
//!
//! # Example
//!
//! ```
//! use arima_pipeline::features::{acf, pacf};
//!
//! let series = vec![1.0, 3.0, 2.0, 5.0, 4.0, 6.0, 5.0, 8.0];
//! let a = acf(&series, 3);
//! let p = pacf(&series, 3);
//! assert_eq!(a.len(), 4);
//! assert_eq!(p[0], 1.0);
//! ```

pub mod autocorrelation;

pub use autocorrelation::{acf, autocorrelation, pacf};
