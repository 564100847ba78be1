//! Forecast result structure for holding point predictions.

use crate::core::series::{Series, TimeLabel};
use crate::error::{ForecastError, Result};

/// Point predictions for consecutive future steps, each with its time label.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Forecast {
    labels: Vec<TimeLabel>,
    point: Vec<f64>,
}

impl Forecast {
    /// Create a forecast from labels and point predictions.
    pub fn new(labels: Vec<TimeLabel>, point: Vec<f64>) -> Result<Self> {
        if labels.len() != point.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: labels.len(),
                got: point.len(),
            });
        }
        Ok(Self { labels, point })
    }

    /// Forecast horizon (number of steps).
    pub fn horizon(&self) -> usize {
        self.point.len()
    }

    /// Check if the forecast is empty.
    pub fn is_empty(&self) -> bool {
        self.point.is_empty()
    }

    /// Point predictions in chronological order.
    pub fn values(&self) -> &[f64] {
        &self.point
    }

    /// Labels of the forecast steps.
    pub fn labels(&self) -> &[TimeLabel] {
        &self.labels
    }

    /// Iterate over `(label, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&TimeLabel, f64)> {
        self.labels.iter().zip(self.point.iter().copied())
    }
}

/// A forecast together with the trailing history it continues.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastWithHistory {
    /// Trailing window of the cleaned input series.
    pub history: Series,
    /// Predictions following the last history label.
    pub forecast: Forecast,
}
