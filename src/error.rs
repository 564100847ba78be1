//! Error types for the arima-pipeline library.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while analysing or forecasting a series.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// The cleaned series is too short or constant to support inference.
    #[error("cannot forecast: constant or insufficient data")]
    DegenerateInput,

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Time label related error.
    #[error("time label error: {0}")]
    TimestampError(String),

    /// The unit-root regression could not be computed.
    #[error("unit-root test failed: {0}")]
    UnitRoot(String),

    /// Fitting or forecasting an ARIMA model failed.
    #[error("ARIMA fit failed: {0}")]
    ModelFit(String),

    /// Model must be fitted before prediction.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// Computation error (e.g., numerical issues).
    #[error("computation error: {0}")]
    ComputationError(String),

    /// A named series was requested that the dataset does not contain.
    #[error("unknown series: {0}")]
    UnknownSeries(String),

    /// Reading the underlying data source failed.
    #[error("data source error: {0}")]
    DataSource(String),
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::DataSource(err.to_string())
    }
}
