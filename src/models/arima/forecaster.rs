//! Fit-and-forecast front end for ARIMA models.

use crate::core::{guard, DegeneratePolicy, Forecast, ForecastWithHistory, Guarded, Series};
use crate::error::{ForecastError, Result};
use crate::models::arima::model::{Arima, ArimaOrder};
use crate::models::Forecaster;
use crate::observe::{default_observer, AnalysisEvent, SharedObserver};
use crate::utils::optimization::NelderMeadConfig;
use std::fmt;

/// Largest accepted AR or MA order.
pub const MAX_ARMA_ORDER: usize = 10;
/// Largest accepted differencing order.
pub const MAX_DIFF_ORDER: usize = 2;

/// Configuration for [`ArimaForecaster`].
#[derive(Debug, Clone)]
pub struct ForecasterConfig {
    /// Number of steps to forecast.
    pub horizon: usize,
    /// Trailing observations returned by [`ArimaForecaster::forecast_with_history`].
    pub history_window: usize,
    /// Treat an unconverged optimiser as a fit failure.
    pub require_convergence: bool,
    /// Settings for the conditional-sum-of-squares optimiser.
    pub optimizer: NelderMeadConfig,
}

impl Default for ForecasterConfig {
    fn default() -> Self {
        Self {
            horizon: 7,
            history_window: 30,
            require_convergence: false,
            optimizer: NelderMeadConfig::default(),
        }
    }
}

impl ForecasterConfig {
    /// Set the forecast horizon.
    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    /// Set the history window.
    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    /// Fail when the optimiser does not converge.
    pub fn with_require_convergence(mut self, require: bool) -> Self {
        self.require_convergence = require;
        self
    }

    /// Set the optimiser configuration.
    pub fn with_optimizer(mut self, optimizer: NelderMeadConfig) -> Self {
        self.optimizer = optimizer;
        self
    }
}

/// Check that orders lie within the supported ranges.
pub fn validate_orders(p: usize, d: usize, q: usize) -> Result<()> {
    if p > MAX_ARMA_ORDER {
        return Err(ForecastError::InvalidParameter(format!(
            "p must be in 0..={}, got {}",
            MAX_ARMA_ORDER, p
        )));
    }
    if d > MAX_DIFF_ORDER {
        return Err(ForecastError::InvalidParameter(format!(
            "d must be in 0..={}, got {}",
            MAX_DIFF_ORDER, d
        )));
    }
    if q > MAX_ARMA_ORDER {
        return Err(ForecastError::InvalidParameter(format!(
            "q must be in 0..={}, got {}",
            MAX_ARMA_ORDER, q
        )));
    }
    Ok(())
}

/// Fits ARIMA(p, d, q) to a series and forecasts the next `horizon` steps.
///
/// Unlike stationarity assessment and order selection, degenerate input is an
/// error here.
#[derive(Clone)]
pub struct ArimaForecaster {
    config: ForecasterConfig,
    observer: SharedObserver,
}

impl fmt::Debug for ArimaForecaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArimaForecaster")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for ArimaForecaster {
    fn default() -> Self {
        Self::new(ForecasterConfig::default(), default_observer())
    }
}

impl ArimaForecaster {
    pub fn new(config: ForecasterConfig, observer: SharedObserver) -> Self {
        Self { config, observer }
    }

    pub fn config(&self) -> &ForecasterConfig {
        &self.config
    }

    /// Forecast `series` with an ARIMA(p, d, q) model.
    ///
    /// # Errors
    /// * [`ForecastError::InvalidParameter`] for orders out of range or a zero horizon
    /// * [`ForecastError::DegenerateInput`] for constant or too-short series
    /// * [`ForecastError::ModelFit`] when fitting or predicting fails
    pub fn forecast(&self, series: &Series, p: usize, d: usize, q: usize) -> Result<Forecast> {
        self.run(series, ArimaOrder::new(p, d, q))
            .map_err(|err| self.report(err))
    }

    /// Forecast and return the trailing history window alongside.
    pub fn forecast_with_history(
        &self,
        series: &Series,
        p: usize,
        d: usize,
        q: usize,
    ) -> Result<ForecastWithHistory> {
        let forecast = self.forecast(series, p, d, q)?;
        Ok(ForecastWithHistory {
            history: series.cleaned().tail(self.config.history_window),
            forecast,
        })
    }

    fn run(&self, series: &Series, order: ArimaOrder) -> Result<Forecast> {
        validate_orders(order.p, order.d, order.q)?;
        if self.config.horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "horizon must be at least 1".to_string(),
            ));
        }

        match guard(series, DegeneratePolicy::HardFail) {
            Guarded::Usable(_) => {}
            Guarded::HardFail(err) => return Err(err),
            Guarded::SoftDefault(_) => return Err(ForecastError::DegenerateInput),
        }

        let mut model = Arima::with_order(order).with_optimizer(self.config.optimizer.clone());
        model.fit(series).map_err(as_fit_error)?;

        if !model.converged() {
            self.observer.observe(&AnalysisEvent::FitNotConverged {
                iterations: model.iterations(),
            });
            if self.config.require_convergence {
                return Err(ForecastError::ModelFit(format!(
                    "optimiser did not converge after {} iterations",
                    model.iterations()
                )));
            }
        }

        let forecast = model.predict(self.config.horizon).map_err(as_fit_error)?;
        self.observer.observe(&AnalysisEvent::ForecastGenerated {
            steps: forecast.horizon(),
        });
        Ok(forecast)
    }

    fn report(&self, err: ForecastError) -> ForecastError {
        self.observer.observe(&AnalysisEvent::ForecastFailed {
            message: err.to_string(),
        });
        err
    }
}

/// Classify model failures as fit errors, keeping their cause.
fn as_fit_error(err: ForecastError) -> ForecastError {
    match err {
        ForecastError::ModelFit(_) => err,
        other => ForecastError::ModelFit(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TimeLabel;
    use crate::observe::testing::RecordingObserver;
    use crate::observe::NullObserver;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::sync::Arc;

    fn forecaster() -> ArimaForecaster {
        ArimaForecaster::new(ForecasterConfig::default(), Arc::new(NullObserver))
    }

    fn walk(n: usize, seed: u64) -> Series {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut level = 50.0;
        Series::from_values(
            (0..n)
                .map(|_| {
                    level += 0.2 + rng.gen_range(-1.0..1.0);
                    level
                })
                .collect(),
        )
    }

    #[test]
    fn forecasts_seven_labelled_steps() {
        let forecast = forecaster().forecast(&walk(60, 1), 1, 1, 1).unwrap();
        assert_eq!(forecast.horizon(), 7);
        assert_eq!(forecast.labels()[0], TimeLabel::Offset(1));
        assert_eq!(forecast.labels()[6], TimeLabel::Offset(7));
        assert!(forecast.values().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn degenerate_input_fails() {
        let err = forecaster()
            .forecast(&Series::from_values(vec![50.0; 5]), 1, 0, 1)
            .unwrap_err();
        assert_eq!(err, ForecastError::DegenerateInput);
        assert_eq!(err.to_string(), "cannot forecast: constant or insufficient data");
    }

    #[test]
    fn out_of_range_orders_are_rejected() {
        let series = walk(40, 2);
        for (p, d, q) in [(11, 0, 0), (0, 3, 0), (0, 0, 11)] {
            assert!(matches!(
                forecaster().forecast(&series, p, d, q),
                Err(ForecastError::InvalidParameter(_))
            ));
        }
        assert!(validate_orders(10, 2, 10).is_ok());
    }

    #[test]
    fn too_few_observations_for_order_is_a_fit_error() {
        let series = Series::from_values(vec![1.0, 3.0, 2.0, 5.0, 4.0]);
        assert!(matches!(
            forecaster().forecast(&series, 10, 2, 10),
            Err(ForecastError::ModelFit(_))
        ));
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let forecaster = ArimaForecaster::new(
            ForecasterConfig::default().with_horizon(0),
            Arc::new(NullObserver),
        );
        assert!(matches!(
            forecaster.forecast(&walk(40, 3), 1, 1, 0),
            Err(ForecastError::InvalidParameter(_))
        ));
    }

    #[test]
    fn strict_convergence_fails_when_iterations_run_out() {
        let forecaster = ArimaForecaster::new(
            ForecasterConfig::default()
                .with_require_convergence(true)
                .with_optimizer(NelderMeadConfig::default().with_max_iter(1)),
            Arc::new(NullObserver),
        );
        assert!(matches!(
            forecaster.forecast(&walk(60, 4), 2, 0, 2),
            Err(ForecastError::ModelFit(_))
        ));
    }

    #[test]
    fn history_window_is_trailing() {
        let series = walk(80, 5);
        let result = forecaster().forecast_with_history(&series, 1, 1, 0).unwrap();
        assert_eq!(result.history.len(), 30);
        assert_eq!(result.history.values(), &series.values()[50..]);
        assert_eq!(result.forecast.horizon(), 7);
    }

    #[test]
    fn forecast_follows_last_observed_label() {
        let mut values = walk(45, 7).values().to_vec();
        values[43] = f64::NAN;
        values[44] = f64::NAN;
        let series = Series::from_values(values);

        let result = forecaster().forecast_with_history(&series, 1, 0, 1).unwrap();
        assert_eq!(result.history.labels().last(), Some(&TimeLabel::Offset(-3)));
        assert_eq!(result.forecast.labels()[0], TimeLabel::Offset(-2));
        assert_eq!(result.forecast.labels()[2], TimeLabel::Offset(1));
    }

    #[test]
    fn every_order_in_range_forecasts_seven_steps() {
        let series = walk(30, 8);
        for p in 0..=MAX_ARMA_ORDER {
            for d in 0..=MAX_DIFF_ORDER {
                for q in 0..=MAX_ARMA_ORDER {
                    let forecast = forecaster()
                        .forecast(&series, p, d, q)
                        .unwrap_or_else(|err| panic!("({}, {}, {}): {}", p, d, q, err));
                    assert_eq!(forecast.horizon(), 7);
                }
            }
        }
    }

    #[test]
    fn events_are_reported() {
        let observer = Arc::new(RecordingObserver::default());
        let forecaster = ArimaForecaster::new(ForecasterConfig::default(), observer.clone());

        forecaster.forecast(&walk(50, 6), 0, 1, 0).unwrap();
        let _ = forecaster.forecast(&Series::from_values(vec![2.0; 3]), 1, 0, 1);

        let events = observer.events();
        assert_eq!(events[0], AnalysisEvent::ForecastGenerated { steps: 7 });
        assert_eq!(
            events[1],
            AnalysisEvent::ForecastFailed {
                message: "cannot forecast: constant or insufficient data".to_string()
            }
        );
    }
}
