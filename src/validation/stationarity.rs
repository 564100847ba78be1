//! Stationarity assessment of a single series.
//!
//! Wraps the ADF test with the degenerate-input guard and converts every
//! failure into a verdict, so assessing one series never aborts a batch.

use crate::core::{guard, DegeneratePolicy, Guarded, Series};
use crate::observe::{default_observer, AnalysisEvent, SharedObserver};
use crate::validation::adf::adf_test;
use crate::validation::mackinnon::CriticalValues;
use std::fmt;

/// Configuration for [`StationarityAnalyzer`].
#[derive(Debug, Clone)]
pub struct StationarityConfig {
    /// p-values strictly below this mark a series stationary.
    pub significance: f64,
    /// Optional cap on the ADF lag search.
    pub max_lag: Option<usize>,
}

impl Default for StationarityConfig {
    fn default() -> Self {
        Self {
            significance: 0.05,
            max_lag: None,
        }
    }
}

impl StationarityConfig {
    /// Set the significance level.
    pub fn with_significance(mut self, significance: f64) -> Self {
        self.significance = significance;
        self
    }

    /// Cap the ADF lag search.
    pub fn with_max_lag(mut self, max_lag: usize) -> Self {
        self.max_lag = Some(max_lag);
        self
    }
}

/// Classification of a series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Stationary,
    NonStationary,
    /// Constant or insufficient data; the test was not run.
    CannotTest,
    /// The test ran and failed.
    Error(String),
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Stationary => write!(f, "Stationary"),
            Verdict::NonStationary => write!(f, "Non-Stationary"),
            Verdict::CannotTest => write!(f, "Cannot Test (Constant or Insufficient Data)"),
            Verdict::Error(message) => write!(f, "Error: {}", message),
        }
    }
}

/// Result of assessing one series. `None` fields are not applicable.
#[derive(Debug, Clone, PartialEq)]
pub struct StationarityResult {
    /// Identifier supplied by the caller.
    pub name: String,
    /// ADF test statistic.
    pub statistic: Option<f64>,
    /// MacKinnon approximate p-value.
    pub p_value: Option<f64>,
    /// Critical values at 1 %, 5 % and 10 %.
    pub critical_values: Option<CriticalValues>,
    /// Lagged differences used by the ADF regression.
    pub used_lag: Option<usize>,
    /// Observations in the ADF regression.
    pub nobs: Option<usize>,
    pub verdict: Verdict,
}

impl StationarityResult {
    fn not_applicable(name: &str, verdict: Verdict) -> Self {
        Self {
            name: name.to_string(),
            statistic: None,
            p_value: None,
            critical_values: None,
            used_lag: None,
            nobs: None,
            verdict,
        }
    }

    /// True when the verdict is [`Verdict::Stationary`].
    pub fn is_stationary(&self) -> bool {
        self.verdict == Verdict::Stationary
    }
}

/// Runs the unit-root test on a series and classifies it.
#[derive(Clone)]
pub struct StationarityAnalyzer {
    config: StationarityConfig,
    observer: SharedObserver,
}

impl fmt::Debug for StationarityAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StationarityAnalyzer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for StationarityAnalyzer {
    fn default() -> Self {
        Self::new(StationarityConfig::default(), default_observer())
    }
}

impl StationarityAnalyzer {
    pub fn new(config: StationarityConfig, observer: SharedObserver) -> Self {
        Self { config, observer }
    }

    pub fn config(&self) -> &StationarityConfig {
        &self.config
    }

    /// Assess `series`, identified by `name` in the result and in events.
    pub fn assess(&self, series: &Series, name: &str) -> StationarityResult {
        let clean = match guard(series, DegeneratePolicy::SoftDefault) {
            Guarded::Usable(clean) => clean,
            Guarded::SoftDefault(_) | Guarded::HardFail(_) => {
                self.observer.observe(&AnalysisEvent::StationarityUntestable {
                    series: name.to_string(),
                });
                return StationarityResult::not_applicable(name, Verdict::CannotTest);
            }
        };

        match adf_test(clean.values(), self.config.max_lag) {
            Ok(adf) => {
                self.observer.observe(&AnalysisEvent::StationarityTested {
                    series: name.to_string(),
                    statistic: adf.statistic,
                    p_value: adf.p_value,
                });
                let verdict = if adf.p_value < self.config.significance {
                    Verdict::Stationary
                } else {
                    Verdict::NonStationary
                };
                StationarityResult {
                    name: name.to_string(),
                    statistic: Some(adf.statistic),
                    p_value: Some(adf.p_value),
                    critical_values: Some(adf.critical_values),
                    used_lag: Some(adf.used_lag),
                    nobs: Some(adf.nobs),
                    verdict,
                }
            }
            Err(err) => {
                let message = err.to_string();
                self.observer.observe(&AnalysisEvent::StationarityFailed {
                    series: name.to_string(),
                    message: message.clone(),
                });
                StationarityResult::not_applicable(name, Verdict::Error(message))
            }
        }
    }
}
