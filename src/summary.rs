//! Descriptive statistics for comparing series.

use crate::core::{Dataset, Series};
use crate::error::{ForecastError, Result};
use crate::utils::stats::{mean, std_dev};

/// Location and spread of a series' observed values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Non-missing observations.
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `NaN` with fewer than two observations.
    pub std: f64,
    /// Coefficient of variation in percent; `None` when the mean is zero or
    /// the standard deviation is undefined.
    pub volatility: Option<f64>,
}

/// Summarise the non-missing values of `series`.
pub fn describe(series: &Series) -> Result<Summary> {
    let clean = series.cleaned();
    if clean.is_empty() {
        return Err(ForecastError::EmptyData);
    }
    let values = clean.values();
    let mean = mean(values);
    let std = std_dev(values);
    let volatility = if mean == 0.0 || !std.is_finite() {
        None
    } else {
        Some(std / mean * 100.0)
    };

    Ok(Summary {
        count: values.len(),
        mean,
        std,
        volatility,
    })
}

/// Percentage change between consecutive observations.
///
/// The first observation has no predecessor and is dropped; changes involving
/// a missing value or a zero predecessor are missing.
pub fn pct_change(series: &Series) -> Result<Series> {
    if series.len() < 2 {
        return Series::new(vec![], vec![]);
    }
    let changes = series
        .values()
        .windows(2)
        .map(|w| {
            let change = (w[1] / w[0] - 1.0) * 100.0;
            if change.is_finite() {
                change
            } else {
                f64::NAN
            }
        })
        .collect();
    Series::new(series.labels()[1..].to_vec(), changes)
}

/// The series with the highest volatility over its trailing `window`
/// observations, with that volatility.
///
/// Series without a defined volatility are skipped; `None` when no series has one.
pub fn most_volatile<S: AsRef<str>>(
    dataset: &Dataset,
    names: &[S],
    window: usize,
) -> Result<Option<(String, f64)>> {
    let mut best: Option<(String, f64)> = None;
    for name in names {
        let name = name.as_ref();
        let series = dataset.get(name)?.tail(window);
        let volatility = match describe(&series) {
            Ok(Summary {
                volatility: Some(v),
                ..
            }) if v.is_finite() => v,
            _ => continue,
        };
        if best.as_ref().map_or(true, |(_, top)| volatility > *top) {
            best = Some((name.to_string(), volatility));
        }
    }
    Ok(best)
}
