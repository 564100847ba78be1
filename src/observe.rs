//! Observability hooks injected into each pipeline stage.
//!
//! Stages never log through global state directly. They report
//! [`AnalysisEvent`]s to the [`AnalysisObserver`] handed to them at
//! construction; [`TracingObserver`] turns those into `tracing` events.

use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Something noteworthy that happened during an analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisEvent {
    /// The stationarity test was skipped on degenerate data.
    StationarityUntestable { series: String },
    /// The stationarity test completed.
    StationarityTested {
        series: String,
        statistic: f64,
        p_value: f64,
    },
    /// The stationarity test itself failed.
    StationarityFailed { series: String, message: String },
    /// One pass of the differencing loop.
    DifferencingStep { d: usize, p_value: f64 },
    /// The unit-root test failed inside the differencing loop.
    DifferencingHalted { d: usize, message: String },
    /// Order selection fell back to defaults on degenerate data.
    OrdersDefaulted { p: usize, d: usize, q: usize },
    /// Orders were estimated from the correlograms.
    OrdersSelected { p: usize, d: usize, q: usize },
    /// The optimiser stopped without meeting its tolerance.
    FitNotConverged { iterations: usize },
    /// A forecast was produced.
    ForecastGenerated { steps: usize },
    /// Fitting or forecasting failed.
    ForecastFailed { message: String },
}

/// Receiver of [`AnalysisEvent`]s.
pub trait AnalysisObserver: Send + Sync {
    fn observe(&self, event: &AnalysisEvent);
}

/// Shared handle to an observer.
pub type SharedObserver = Arc<dyn AnalysisObserver>;

/// Emits every event as a structured `tracing` record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl AnalysisObserver for TracingObserver {
    fn observe(&self, event: &AnalysisEvent) {
        match event {
            AnalysisEvent::StationarityUntestable { series } => {
                warn!(series = %series, "Cannot perform ADF test: constant or insufficient data");
            }
            AnalysisEvent::StationarityTested {
                series,
                statistic,
                p_value,
            } => {
                info!(series = %series, statistic, p_value, "ADF test completed");
            }
            AnalysisEvent::StationarityFailed { series, message } => {
                error!(series = %series, error = %message, "ADF test failed");
            }
            AnalysisEvent::DifferencingStep { d, p_value } => {
                debug!(d, p_value, "Unit-root check");
            }
            AnalysisEvent::DifferencingHalted { d, message } => {
                warn!(d, error = %message, "Unit-root test failed, differencing stopped");
            }
            AnalysisEvent::OrdersDefaulted { p, d, q } => {
                warn!(p, d, q, "Cannot determine ARIMA parameters: constant or insufficient data");
            }
            AnalysisEvent::OrdersSelected { p, d, q } => {
                info!(p, d, q, "ARIMA parameters determined");
            }
            AnalysisEvent::FitNotConverged { iterations } => {
                warn!(iterations, "ARIMA optimiser did not converge");
            }
            AnalysisEvent::ForecastGenerated { steps } => {
                info!(steps, "Forecast generated");
            }
            AnalysisEvent::ForecastFailed { message } => {
                error!(error = %message, "ARIMA forecast failed");
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl AnalysisObserver for NullObserver {
    fn observe(&self, _event: &AnalysisEvent) {}
}

/// The observer used when none is supplied.
pub fn default_observer() -> SharedObserver {
    Arc::new(TracingObserver)
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingObserver;
    use super::*;

    #[test]
    fn recording_observer_keeps_order() {
        let observer = RecordingObserver::default();
        observer.observe(&AnalysisEvent::OrdersSelected { p: 1, d: 1, q: 0 });
        observer.observe(&AnalysisEvent::ForecastGenerated { steps: 7 });

        assert_eq!(
            observer.events(),
            vec![
                AnalysisEvent::OrdersSelected { p: 1, d: 1, q: 0 },
                AnalysisEvent::ForecastGenerated { steps: 7 },
            ]
        );
    }

    #[test]
    fn tracing_and_null_observers_accept_all_events() {
        let events = [
            AnalysisEvent::StationarityUntestable {
                series: "A".to_string(),
            },
            AnalysisEvent::DifferencingStep { d: 0, p_value: 0.4 },
            AnalysisEvent::ForecastFailed {
                message: "boom".to_string(),
            },
        ];
        let tracing = default_observer();
        for event in &events {
            tracing.observe(event);
            NullObserver.observe(event);
        }
    }
}
