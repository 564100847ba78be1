//! Heuristic ARIMA order selection.
//!
//! `d` is the number of first differences needed before the ADF test rejects
//! a unit root (capped). `p` and `q` are read off the partial and plain
//! autocorrelation functions of the differenced series: the first index whose
//! magnitude exceeds a fixed threshold.

use crate::core::guard::MIN_OBSERVATIONS;
use crate::core::{guard, DegeneratePolicy, Guarded, Series};
use crate::features::autocorrelation::{acf, pacf};
use crate::models::arima::model::ArimaOrder;
use crate::observe::{default_observer, AnalysisEvent, SharedObserver};
use crate::validation::adf::adf_test;
use std::fmt;
use std::ops::RangeInclusive;

/// Configuration for [`OrderSelector`].
#[derive(Debug, Clone)]
pub struct OrderSelectionConfig {
    /// Differencing continues while the ADF p-value is above this.
    pub significance: f64,
    /// Maximum differencing order.
    pub max_diff: usize,
    /// Lags of ACF/PACF to inspect (lag 0 excluded).
    pub n_lags: usize,
    /// Magnitude a correlation must exceed to count as significant.
    pub threshold: f64,
    /// Upper bound for p and q.
    pub max_order: usize,
}

impl Default for OrderSelectionConfig {
    fn default() -> Self {
        Self {
            significance: 0.05,
            max_diff: 2,
            n_lags: 20,
            threshold: 0.2,
            max_order: 10,
        }
    }
}

impl OrderSelectionConfig {
    /// Set the unit-root significance level.
    pub fn with_significance(mut self, significance: f64) -> Self {
        self.significance = significance;
        self
    }

    /// Set the maximum differencing order.
    pub fn with_max_diff(mut self, max_diff: usize) -> Self {
        self.max_diff = max_diff;
        self
    }

    /// Set the number of correlation lags inspected.
    pub fn with_n_lags(mut self, n_lags: usize) -> Self {
        self.n_lags = n_lags;
        self
    }

    /// Set the significance threshold for correlations.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the upper bound for p and q.
    pub fn with_max_order(mut self, max_order: usize) -> Self {
        self.max_order = max_order;
        self
    }
}

/// ACF and PACF values for lags `1..=n`.
#[derive(Debug, Clone, PartialEq)]
pub struct Correlogram {
    pub acf: Vec<f64>,
    pub pacf: Vec<f64>,
}

impl Correlogram {
    /// Lag of each entry in `acf` and `pacf`.
    pub fn lags(&self) -> RangeInclusive<usize> {
        1..=self.acf.len()
    }
}

/// Proposed ARIMA orders for one series.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderProposal {
    pub p: usize,
    pub d: usize,
    pub q: usize,
    /// Correlations the orders were read from; `None` when defaulted.
    pub curves: Option<Correlogram>,
    /// ADF p-value at each differencing step, starting with the raw series.
    pub unit_root_trace: Vec<f64>,
}

impl OrderProposal {
    /// The fallback used for degenerate input.
    pub fn fallback() -> Self {
        let order = ArimaOrder::default();
        Self {
            p: order.p,
            d: order.d,
            q: order.q,
            curves: None,
            unit_root_trace: vec![],
        }
    }

    /// True when the orders were estimated from data.
    pub fn is_estimated(&self) -> bool {
        self.curves.is_some()
    }

    pub fn order(&self) -> ArimaOrder {
        ArimaOrder::new(self.p, self.d, self.q)
    }
}

/// Outcome of the differencing loop.
struct Differenced {
    series: Series,
    d: usize,
    trace: Vec<f64>,
}

/// Proposes (p, d, q) from unit-root tests and correlation cut-offs.
#[derive(Clone)]
pub struct OrderSelector {
    config: OrderSelectionConfig,
    observer: SharedObserver,
}

impl fmt::Debug for OrderSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderSelector")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for OrderSelector {
    fn default() -> Self {
        Self::new(OrderSelectionConfig::default(), default_observer())
    }
}

impl OrderSelector {
    pub fn new(config: OrderSelectionConfig, observer: SharedObserver) -> Self {
        Self { config, observer }
    }

    pub fn config(&self) -> &OrderSelectionConfig {
        &self.config
    }

    /// Propose orders for `series`. Degenerate input yields
    /// [`OrderProposal::fallback`].
    pub fn select(&self, series: &Series) -> OrderProposal {
        let clean = match guard(series, DegeneratePolicy::SoftDefault) {
            Guarded::Usable(clean) => clean,
            Guarded::SoftDefault(_) | Guarded::HardFail(_) => {
                let fallback = OrderProposal::fallback();
                self.observer.observe(&AnalysisEvent::OrdersDefaulted {
                    p: fallback.p,
                    d: fallback.d,
                    q: fallback.q,
                });
                return fallback;
            }
        };

        let Differenced { series, d, trace } = self.difference_until_stationary(clean);

        let values = series.values();
        let acf_values = acf(values, self.config.n_lags).split_off(1);
        let pacf_values = pacf(values, self.config.n_lags).split_off(1);

        let p = self.first_significant(&pacf_values);
        let q = self.first_significant(&acf_values);
        self.observer
            .observe(&AnalysisEvent::OrdersSelected { p, d, q });

        OrderProposal {
            p,
            d,
            q,
            curves: Some(Correlogram {
                acf: acf_values,
                pacf: pacf_values,
            }),
            unit_root_trace: trace,
        }
    }

    /// Difference while the unit root cannot be rejected, up to `max_diff` times.
    ///
    /// A failing test or a series too short to difference again ends the loop
    /// at the current order.
    fn difference_until_stationary(&self, mut series: Series) -> Differenced {
        let mut d = 0;
        let mut trace = Vec::with_capacity(self.config.max_diff + 1);

        loop {
            match adf_test(series.values(), None) {
                Ok(adf) => {
                    trace.push(adf.p_value);
                    self.observer.observe(&AnalysisEvent::DifferencingStep {
                        d,
                        p_value: adf.p_value,
                    });
                    if adf.p_value <= self.config.significance || d >= self.config.max_diff {
                        break;
                    }
                }
                Err(err) => {
                    self.observer.observe(&AnalysisEvent::DifferencingHalted {
                        d,
                        message: err.to_string(),
                    });
                    break;
                }
            }

            let next = series.differenced();
            if next.len() < MIN_OBSERVATIONS {
                self.observer.observe(&AnalysisEvent::DifferencingHalted {
                    d,
                    message: format!("{} observations left after differencing", next.len()),
                });
                break;
            }
            series = next;
            d += 1;
        }

        Differenced { series, d, trace }
    }

    /// First 0-based position whose magnitude exceeds the threshold, else 1.
    fn first_significant(&self, values: &[f64]) -> usize {
        values
            .iter()
            .position(|v| v.abs() > self.config.threshold)
            .unwrap_or(1)
            .min(self.config.max_order)
    }
}
