//! Degenerate-input guard shared by every pipeline stage.
//!
//! Each stage cleans its input and asks [`guard`] whether inference is
//! possible. What happens on degenerate data is the stage's own policy:
//! the stationarity analyzer and the order selector fall back to sentinel
//! results, the forecaster refuses outright.

use crate::core::series::Series;
use crate::error::ForecastError;

/// Minimum number of clean observations for any statistical inference.
pub const MIN_OBSERVATIONS: usize = 2;

/// Why a cleaned series cannot support inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// Fewer than [`MIN_OBSERVATIONS`] observations remain.
    TooShort { len: usize },
    /// All observations are identical (zero variance).
    Constant,
}

/// How a stage reacts to degenerate input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegeneratePolicy {
    /// Return a sentinel result instead of failing.
    SoftDefault,
    /// Fail with [`ForecastError::DegenerateInput`].
    HardFail,
}

/// Outcome of guarding a series.
#[derive(Debug, Clone, PartialEq)]
pub enum Guarded {
    /// The cleaned series is fit for inference.
    Usable(Series),
    /// Degenerate input under [`DegeneratePolicy::SoftDefault`].
    SoftDefault(Degeneracy),
    /// Degenerate input under [`DegeneratePolicy::HardFail`].
    HardFail(ForecastError),
}

/// Classify cleaned values, returning the degeneracy if any.
pub fn degeneracy(values: &[f64]) -> Option<Degeneracy> {
    if values.len() < MIN_OBSERVATIONS {
        return Some(Degeneracy::TooShort { len: values.len() });
    }
    let first = values[0];
    if values.iter().all(|&v| v == first) {
        return Some(Degeneracy::Constant);
    }
    None
}

/// Clean `series` and decide whether the caller may proceed.
pub fn guard(series: &Series, policy: DegeneratePolicy) -> Guarded {
    let clean = series.cleaned();
    match (degeneracy(clean.values()), policy) {
        (None, _) => Guarded::Usable(clean),
        (Some(reason), DegeneratePolicy::SoftDefault) => Guarded::SoftDefault(reason),
        (Some(_), DegeneratePolicy::HardFail) => Guarded::HardFail(ForecastError::DegenerateInput),
    }
}
