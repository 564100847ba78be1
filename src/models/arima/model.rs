//! ARIMA (Autoregressive Integrated Moving Average) model.

use crate::core::{Forecast, Series};
use crate::error::{ForecastError, Result};
use crate::models::arima::diff::{difference, integrate};
use crate::models::Forecaster;
use crate::utils::optimization::{nelder_mead, NelderMeadConfig};
use crate::utils::stats::mean;

/// Coefficient bound keeping AR terms stationary and MA terms invertible.
const COEFFICIENT_BOUND: f64 = 0.99;

/// ARIMA model orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArimaOrder {
    /// AR order (p)
    pub p: usize,
    /// Differencing order (d)
    pub d: usize,
    /// MA order (q)
    pub q: usize,
}

impl ArimaOrder {
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }

    /// Whether a mean term is estimated. Integrated models carry no drift.
    pub fn includes_mean(&self) -> bool {
        self.d == 0
    }

    /// Total number of estimated parameters.
    pub fn num_params(&self) -> usize {
        self.p + self.q + usize::from(self.includes_mean())
    }

    /// Observations needed before the model can be fitted.
    pub fn min_observations(&self) -> usize {
        self.d + self.p.max(self.q) + 2
    }
}

impl Default for ArimaOrder {
    fn default() -> Self {
        Self::new(1, 0, 1)
    }
}

/// ARIMA forecasting model fitted by conditional sum of squares.
///
/// ARIMA(p, d, q) combines:
/// - AR(p): Autoregressive component
/// - I(d): Differencing for stationarity
/// - MA(q): Moving average component
#[derive(Debug, Clone)]
pub struct Arima {
    order: ArimaOrder,
    optimizer: NelderMeadConfig,
    ar_coefficients: Vec<f64>,
    ma_coefficients: Vec<f64>,
    /// Mean of the stationary series; zero when d > 0.
    mean: f64,
    /// Clean observations with their labels.
    history: Option<Series>,
    /// Clean observations on the original scale.
    original: Option<Vec<f64>>,
    differenced: Option<Vec<f64>>,
    /// In-sample innovations on the differenced scale.
    residuals: Option<Vec<f64>>,
    converged: bool,
    iterations: usize,
}

impl Arima {
    /// Create a new ARIMA model.
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self::with_order(ArimaOrder::new(p, d, q))
    }

    pub fn with_order(order: ArimaOrder) -> Self {
        Self {
            order,
            optimizer: NelderMeadConfig::default(),
            ar_coefficients: vec![],
            ma_coefficients: vec![],
            mean: 0.0,
            history: None,
            original: None,
            differenced: None,
            residuals: None,
            converged: false,
            iterations: 0,
        }
    }

    /// Replace the optimiser settings used by [`Forecaster::fit`].
    pub fn with_optimizer(mut self, optimizer: NelderMeadConfig) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub fn order(&self) -> ArimaOrder {
        self.order
    }

    /// Get AR coefficients.
    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar_coefficients
    }

    /// Get MA coefficients.
    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma_coefficients
    }

    /// Get the estimated mean (zero for integrated models).
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Whether the optimiser met its tolerance.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Optimiser iterations spent in the last fit.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// One-step prediction at `t` from the observations and innovations before it.
    fn predict_at(ar: &[f64], ma: &[f64], mean: f64, values: &[f64], errors: &[f64], t: usize) -> f64 {
        let mut pred = mean;
        for (i, coef) in ar.iter().enumerate() {
            if t > i {
                pred += coef * (values[t - 1 - i] - mean);
            }
        }
        for (i, coef) in ma.iter().enumerate() {
            if t > i {
                pred += coef * errors[t - 1 - i];
            }
        }
        pred
    }

    /// Calculate the conditional sum of squares for given parameters.
    fn calculate_css(diff_series: &[f64], ar: &[f64], ma: &[f64], mean: f64) -> f64 {
        let n = diff_series.len();
        let start = ar.len().max(ma.len());

        if n <= start {
            return f64::INFINITY;
        }

        let mut residuals = vec![0.0; n];
        let mut css = 0.0;

        for t in start..n {
            let error = diff_series[t] - Self::predict_at(ar, ma, mean, diff_series, &residuals, t);
            residuals[t] = error;
            css += error * error;
        }

        css
    }

    /// Split a parameter vector into (mean, AR, MA).
    fn unpack<'a>(&self, params: &'a [f64]) -> (f64, &'a [f64], &'a [f64]) {
        let offset = usize::from(self.order.includes_mean());
        let mean = if offset == 1 { params[0] } else { 0.0 };
        let ar = &params[offset..offset + self.order.p];
        let ma = &params[offset + self.order.p..];
        (mean, ar, ma)
    }

    /// Estimate parameters using conditional least squares.
    fn estimate_parameters(&mut self, diff_series: &[f64]) -> Result<()> {
        let p = self.order.p;
        let q = self.order.q;
        let sample_mean = if self.order.includes_mean() {
            mean(diff_series)
        } else {
            0.0
        };

        if p == 0 && q == 0 {
            self.mean = sample_mean;
            self.ar_coefficients = vec![];
            self.ma_coefficients = vec![];
            self.converged = true;
            self.iterations = 0;
            return Ok(());
        }

        let mut initial = Vec::with_capacity(self.order.num_params());
        let mut bounds = Vec::with_capacity(self.order.num_params());
        if self.order.includes_mean() {
            initial.push(sample_mean);
            bounds.push((f64::NEG_INFINITY, f64::INFINITY));
        }
        for i in 0..p {
            initial.push(0.1 / (i + 1) as f64);
            bounds.push((-COEFFICIENT_BOUND, COEFFICIENT_BOUND));
        }
        for i in 0..q {
            initial.push(0.1 / (i + 1) as f64);
            bounds.push((-COEFFICIENT_BOUND, COEFFICIENT_BOUND));
        }

        let result = nelder_mead(
            |params| {
                let (mean, ar, ma) = self.unpack(params);
                Self::calculate_css(diff_series, ar, ma, mean)
            },
            &initial,
            Some(&bounds),
            self.optimizer.clone(),
        );

        if !result.optimal_value.is_finite() {
            return Err(ForecastError::ModelFit(
                "conditional sum of squares is not finite".to_string(),
            ));
        }
        if result.optimal_point.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::ModelFit(
                "estimated coefficients are not finite".to_string(),
            ));
        }

        let (mean, ar, ma) = self.unpack(&result.optimal_point);
        self.mean = mean;
        self.ar_coefficients = ar.to_vec();
        self.ma_coefficients = ma.to_vec();
        self.converged = result.converged;
        self.iterations = result.iterations;
        Ok(())
    }

    /// Innovations of the fitted model; the MA recursion continues from them.
    fn calculate_residuals(&self, diff_series: &[f64]) -> Vec<f64> {
        let start = self.order.p.max(self.order.q);
        let mut residuals = vec![0.0; diff_series.len()];

        for t in start..diff_series.len() {
            let pred = Self::predict_at(
                &self.ar_coefficients,
                &self.ma_coefficients,
                self.mean,
                diff_series,
                &residuals,
                t,
            );
            residuals[t] = diff_series[t] - pred;
        }
        residuals
    }
}

impl Default for Arima {
    fn default() -> Self {
        Self::with_order(ArimaOrder::default())
    }
}

impl Forecaster for Arima {
    fn fit(&mut self, series: &Series) -> Result<()> {
        let clean = series.cleaned();
        let values = clean.values();
        let min_len = self.order.min_observations();

        if values.len() < min_len {
            return Err(ForecastError::InsufficientData {
                needed: min_len,
                got: values.len(),
            });
        }

        let diff_series = difference(values, self.order.d);
        self.estimate_parameters(&diff_series)?;

        self.residuals = Some(self.calculate_residuals(&diff_series));
        self.original = Some(values.to_vec());
        self.differenced = Some(diff_series);
        self.history = Some(clean);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let history = self.history.as_ref().ok_or(ForecastError::FitRequired)?;
        let original = self.original.as_ref().ok_or(ForecastError::FitRequired)?;
        let diff_series = self
            .differenced
            .as_ref()
            .ok_or(ForecastError::FitRequired)?;
        let residuals = self.residuals.as_ref().ok_or(ForecastError::FitRequired)?;

        let mut extended_diff = diff_series.clone();
        let mut extended_residuals = residuals.clone();

        for _ in 0..horizon {
            let t = extended_diff.len();
            let pred = Self::predict_at(
                &self.ar_coefficients,
                &self.ma_coefficients,
                self.mean,
                &extended_diff,
                &extended_residuals,
                t,
            );
            extended_diff.push(pred);
            // Future innovations are zero in expectation.
            extended_residuals.push(0.0);
        }

        let forecast_diff = &extended_diff[diff_series.len()..];
        let predictions = integrate(forecast_diff, original, self.order.d);

        if predictions.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::ModelFit(
                "predictions are not finite".to_string(),
            ));
        }

        Forecast::new(history.future_labels(horizon)?, predictions)
    }

    fn is_fitted(&self) -> bool {
        self.history.is_some()
    }

    fn name(&self) -> &str {
        "ARIMA"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TimeLabel;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn ar1(phi: f64, n: usize, seed: u64) -> Series {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut values = vec![0.0; n];
        for t in 1..n {
            values[t] = phi * values[t - 1] + rng.gen_range(-1.0..1.0);
        }
        Series::from_values(values.into_iter().map(|v| v + 20.0).collect())
    }

    #[test]
    fn order_parameters() {
        let order = ArimaOrder::new(2, 1, 3);
        assert!(!order.includes_mean());
        assert_eq!(order.num_params(), 5);
        assert_eq!(order.min_observations(), 6);

        let order = ArimaOrder::new(2, 0, 3);
        assert!(order.includes_mean());
        assert_eq!(order.num_params(), 6);
    }

    #[test]
    fn arima_ar1_recovers_coefficient() {
        let mut model = Arima::new(1, 0, 0);
        model.fit(&ar1(0.7, 400, 4)).unwrap();

        assert_relative_eq!(model.ar_coefficients()[0], 0.7, epsilon = 0.1);
        assert_relative_eq!(model.mean(), 20.0, epsilon = 0.5);
        assert!(model.converged());
    }

    #[test]
    fn arima_basic_fit() {
        let values: Vec<f64> = (0..50)
            .map(|i| 10.0 + 0.5 * i as f64 + (i as f64 * 0.3).sin())
            .collect();
        let mut model = Arima::new(1, 1, 1);
        model.fit(&Series::from_values(values)).unwrap();

        assert_eq!(model.ar_coefficients().len(), 1);
        assert_eq!(model.ma_coefficients().len(), 1);
        assert!(model.is_fitted());

        let forecast = model.predict(7).unwrap();
        assert_eq!(forecast.horizon(), 7);
        assert!(forecast.values().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn integrated_models_have_no_mean() {
        let values: Vec<f64> = (0..40).map(|i| 5.0 + i as f64 + (i % 3) as f64).collect();
        let mut model = Arima::new(1, 1, 0);
        model.fit(&Series::from_values(values)).unwrap();
        assert_eq!(model.mean(), 0.0);
    }

    #[test]
    fn arima_with_differencing_continues_trend() {
        let values: Vec<f64> = (0..50).map(|i| 10.0 + 2.0 * i as f64).collect();
        let last = values[49];
        let mut model = Arima::new(1, 1, 0);
        model.fit(&Series::from_values(values)).unwrap();

        let forecast = model.predict(5).unwrap();
        assert!(forecast.values()[0] > last);
    }

    #[test]
    fn random_walk_forecast_is_flat() {
        let values: Vec<f64> = (0..30).map(|i| ((i * 7) % 11) as f64).collect();
        let last = values[29];
        let mut model = Arima::new(0, 1, 0);
        model.fit(&Series::from_values(values)).unwrap();

        for value in model.predict(4).unwrap().values() {
            assert_relative_eq!(*value, last, epsilon = 1e-12);
        }
    }

    #[test]
    fn forecast_labels_continue_series() {
        let mut model = Arima::new(1, 0, 0);
        model.fit(&ar1(0.5, 60, 8)).unwrap();

        let forecast = model.predict(3).unwrap();
        assert_eq!(
            forecast.labels(),
            &[TimeLabel::Offset(1), TimeLabel::Offset(2), TimeLabel::Offset(3)]
        );
    }

    #[test]
    fn missing_values_are_skipped() {
        let mut values: Vec<f64> = (0..40).map(|i| (i as f64 * 0.4).sin() * 3.0).collect();
        values[5] = f64::NAN;
        values[17] = f64::INFINITY;
        let mut model = Arima::new(1, 0, 1);
        model.fit(&Series::from_values(values)).unwrap();
        assert!(model.predict(2).unwrap().values().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn trailing_missing_values_do_not_shift_labels() {
        let mut values: Vec<f64> = ar1(0.5, 40, 12).values().to_vec();
        values[38] = f64::NAN;
        values[39] = f64::NAN;
        let mut model = Arima::new(1, 0, 1);
        model.fit(&Series::from_values(values)).unwrap();

        // The last observed value sits at Day -3.
        let forecast = model.predict(2).unwrap();
        assert_eq!(
            forecast.labels(),
            &[TimeLabel::Offset(-2), TimeLabel::Offset(-1)]
        );
    }

    #[test]
    fn arima_insufficient_data() {
        let mut model = Arima::new(2, 1, 1);
        assert!(matches!(
            model.fit(&Series::from_values(vec![1.0, 2.0, 3.0])),
            Err(ForecastError::InsufficientData { needed: 5, got: 3 })
        ));
    }

    #[test]
    fn arima_requires_fit() {
        let model = Arima::new(1, 1, 1);
        assert!(!model.is_fitted());
        assert!(matches!(model.predict(5), Err(ForecastError::FitRequired)));
    }

    #[test]
    fn arima_zero_horizon() {
        let values: Vec<f64> = (0..30).map(|i| i as f64 + (i % 2) as f64).collect();
        let mut model = Arima::new(1, 1, 1);
        model.fit(&Series::from_values(values)).unwrap();
        assert_eq!(model.predict(0).unwrap().horizon(), 0);
    }

    #[test]
    fn arima_default_and_name() {
        let model = Arima::default();
        assert_eq!(model.order(), ArimaOrder::new(1, 0, 1));
        assert_eq!(model.name(), "ARIMA");
    }
}
