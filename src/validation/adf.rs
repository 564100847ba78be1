//! Augmented Dickey-Fuller unit-root test.
//!
//! Regression with a constant:
//! `Δy_t = α + β y_{t-1} + Σ_{i=1..k} γ_i Δy_{t-i} + ε_t`.
//! The number of lagged differences `k` is chosen by AIC over
//! `0..=maxlag`, all candidates estimated on the same sample. The test
//! statistic is the t-value of `β`.

use crate::error::{ForecastError, Result};
use crate::utils::ols::{ols_fit, OlsFit};
use crate::validation::mackinnon::{self, CriticalValues};

/// Outcome of an ADF regression.
#[derive(Debug, Clone, PartialEq)]
pub struct AdfResult {
    /// t-statistic of the lagged level coefficient.
    pub statistic: f64,
    /// MacKinnon approximate p-value.
    pub p_value: f64,
    /// Number of lagged differences in the final regression.
    pub used_lag: usize,
    /// Observations in the final regression.
    pub nobs: usize,
    /// Critical values for `nobs` observations.
    pub critical_values: CriticalValues,
}

/// Upper bound on the lag order for a series of length `n`.
///
/// `min(ceil(12 (n/100)^¼), n/2 − 2)`; a user cap can only lower it.
/// Fails when the series cannot support even the lag-free regression.
pub fn max_lag(n: usize, cap: Option<usize>) -> Result<usize> {
    let allowed = (n / 2) as i64 - 2;
    if allowed < 0 {
        return Err(ForecastError::UnitRoot(
            "sample size is too short to use selected regression component".to_string(),
        ));
    }
    let schwert = (12.0 * (n as f64 / 100.0).powf(0.25)).ceil() as i64;
    let mut lag = schwert.min(allowed) as usize;
    if let Some(cap) = cap {
        lag = lag.min(cap);
    }
    Ok(lag)
}

/// Build the regression for `lags` lagged differences, starting at row offset
/// `start` so that every candidate shares the same sample.
///
/// Returns the response and the columns `[level, constant, Δy_{t-1}, …]`.
fn design(series: &[f64], diff: &[f64], start: usize, lags: usize) -> (Vec<f64>, Vec<Vec<f64>>) {
    let rows = start..diff.len();
    let y: Vec<f64> = rows.clone().map(|t| diff[t]).collect();

    let mut columns = Vec::with_capacity(lags + 2);
    columns.push(rows.clone().map(|t| series[t]).collect());
    columns.push(vec![1.0; y.len()]);
    for j in 1..=lags {
        columns.push(rows.clone().map(|t| diff[t - j]).collect());
    }
    (y, columns)
}

/// A regression usable for inference: solvable and not a perfect fit.
fn usable_fit(y: &[f64], columns: &[Vec<f64>]) -> Option<OlsFit> {
    match ols_fit(y, columns) {
        Ok(fit) if !fit.is_exact_fit() && fit.ssr.is_finite() => Some(fit),
        _ => None,
    }
}

/// Run the ADF test on a clean series.
///
/// # Arguments
/// * `series` - Observations without missing values
/// * `lag_cap` - Optional cap on the automatically chosen maximum lag
pub fn adf_test(series: &[f64], lag_cap: Option<usize>) -> Result<AdfResult> {
    let n = series.len();
    let maxlag = max_lag(n, lag_cap)?;
    let diff: Vec<f64> = series.windows(2).map(|w| w[1] - w[0]).collect();

    if diff.len() <= maxlag + 2 {
        return Err(ForecastError::UnitRoot(format!(
            "{} observations cannot support {} lags",
            n, maxlag
        )));
    }

    let mut best: Option<(usize, f64)> = None;
    for lags in 0..=maxlag {
        let (y, columns) = design(series, &diff, maxlag, lags);
        if let Some(fit) = usable_fit(&y, &columns) {
            let aic = fit.aic();
            if best.map_or(true, |(_, best_aic)| aic < best_aic) {
                best = Some((lags, aic));
            }
        }
    }

    let used_lag = match best {
        Some((lags, _)) => lags,
        None => {
            return Err(ForecastError::UnitRoot(
                "every lag candidate produced a singular or perfect-fit regression".to_string(),
            ))
        }
    };

    let (y, columns) = design(series, &diff, used_lag, used_lag);
    let fit = usable_fit(&y, &columns).ok_or_else(|| {
        ForecastError::UnitRoot(format!(
            "regression with {} lags is singular or a perfect fit",
            used_lag
        ))
    })?;

    let statistic = fit.t_value(0);
    if !statistic.is_finite() {
        return Err(ForecastError::UnitRoot(
            "test statistic is not finite".to_string(),
        ));
    }

    Ok(AdfResult {
        statistic,
        p_value: mackinnon::p_value(statistic),
        used_lag,
        nobs: fit.nobs,
        critical_values: mackinnon::critical_values(fit.nobs),
    })
}
