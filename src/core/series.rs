//! Series data structure pairing observations with discrete time labels.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// A discrete time label attached to one observation.
///
/// `Offset` labels count days relative to the present, the way the price
/// history is indexed (`Day -100` … `Day -1`). There is no `Day 0`: the step
/// after `Day -1` is `Day +1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeLabel {
    /// Relative day offset.
    Offset(i64),
    /// Absolute timestamp.
    Timestamp(DateTime<Utc>),
}

impl TimeLabel {
    /// Returns true if `self` strictly precedes `other`.
    ///
    /// Labels of different kinds are not comparable.
    fn precedes(&self, other: &TimeLabel) -> Option<bool> {
        match (self, other) {
            (TimeLabel::Offset(a), TimeLabel::Offset(b)) => Some(a < b),
            (TimeLabel::Timestamp(a), TimeLabel::Timestamp(b)) => Some(a < b),
            _ => None,
        }
    }

    /// The offset label `steps` days after `self`, skipping day zero.
    fn offset_after(day: i64, steps: i64) -> i64 {
        let next = day + steps;
        if day < 0 && next >= 0 {
            next + 1
        } else {
            next
        }
    }
}

impl fmt::Display for TimeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeLabel::Offset(day) if *day > 0 => write!(f, "Day +{}", day),
            TimeLabel::Offset(day) => write!(f, "Day {}", day),
            TimeLabel::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// An ordered univariate series with one time label per observation.
///
/// Missing observations are stored as non-finite values (`NaN`, `±inf`) and
/// are removed together with their labels by [`Series::cleaned`].
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    labels: Vec<TimeLabel>,
    values: Vec<f64>,
}

impl Series {
    /// Create a series from labels and values.
    ///
    /// Labels must be of a single kind and strictly increasing.
    pub fn new(labels: Vec<TimeLabel>, values: Vec<f64>) -> Result<Self> {
        if labels.len() != values.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: labels.len(),
                got: values.len(),
            });
        }

        for pair in labels.windows(2) {
            match pair[0].precedes(&pair[1]) {
                Some(true) => {}
                Some(false) => {
                    return Err(ForecastError::TimestampError(
                        "time labels must be strictly increasing".to_string(),
                    ))
                }
                None => {
                    return Err(ForecastError::TimestampError(
                        "time labels must all be offsets or all be timestamps".to_string(),
                    ))
                }
            }
        }

        Ok(Self { labels, values })
    }

    /// Create a series labelled `Day -n` … `Day -1`.
    pub fn from_values(values: Vec<f64>) -> Self {
        let n = values.len() as i64;
        let labels = (0..n).map(|i| TimeLabel::Offset(i - n)).collect();
        Self { labels, values }
    }

    /// Create a series from absolute timestamps.
    pub fn from_timestamps(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        Self::new(
            timestamps.into_iter().map(TimeLabel::Timestamp).collect(),
            values,
        )
    }

    /// Number of observations, including missing ones.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the series has no observations.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Observation values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Time labels, one per observation.
    pub fn labels(&self) -> &[TimeLabel] {
        &self.labels
    }

    /// Check if any observation is missing.
    pub fn has_missing_values(&self) -> bool {
        self.values.iter().any(|v| !v.is_finite())
    }

    /// Drop missing observations along with their labels.
    pub fn cleaned(&self) -> Series {
        let (labels, values) = self
            .labels
            .iter()
            .zip(self.values.iter())
            .filter(|(_, v)| v.is_finite())
            .map(|(l, v)| (*l, *v))
            .unzip();
        Series { labels, values }
    }

    /// The trailing `n` observations (or the whole series if shorter).
    pub fn tail(&self, n: usize) -> Series {
        let start = self.len().saturating_sub(n);
        Series {
            labels: self.labels[start..].to_vec(),
            values: self.values[start..].to_vec(),
        }
    }

    /// First-order difference; the leading observation is dropped.
    pub fn differenced(&self) -> Series {
        if self.len() < 2 {
            return Series {
                labels: vec![],
                values: vec![],
            };
        }
        Series {
            labels: self.labels[1..].to_vec(),
            values: self.values.windows(2).map(|w| w[1] - w[0]).collect(),
        }
    }

    /// Labels for the `horizon` steps immediately following the last observation.
    ///
    /// Offset labels continue day by day; timestamp labels continue with the
    /// spacing of the last two observations.
    pub fn future_labels(&self, horizon: usize) -> Result<Vec<TimeLabel>> {
        let last = match self.labels.last() {
            Some(label) => *label,
            None => return Err(ForecastError::EmptyData),
        };

        match last {
            TimeLabel::Offset(day) => Ok((1..=horizon as i64)
                .map(|h| TimeLabel::Offset(TimeLabel::offset_after(day, h)))
                .collect()),
            TimeLabel::Timestamp(ts) => {
                let step = self.timestamp_step()?;
                Ok((1..=horizon as i32)
                    .map(|h| TimeLabel::Timestamp(ts + step * h))
                    .collect())
            }
        }
    }

    fn timestamp_step(&self) -> Result<Duration> {
        let n = self.labels.len();
        if n < 2 {
            return Err(ForecastError::TimestampError(
                "need at least two timestamps to infer spacing".to_string(),
            ));
        }
        match (self.labels[n - 2], self.labels[n - 1]) {
            (TimeLabel::Timestamp(a), TimeLabel::Timestamp(b)) => Ok(b - a),
            _ => Err(ForecastError::TimestampError(
                "mixed label kinds".to_string(),
            )),
        }
    }
}
