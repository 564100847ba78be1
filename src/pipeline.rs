//! End-to-end analysis of one or many series.
//!
//! Each series is assessed for stationarity, given proposed ARIMA orders
//! (optionally overridden by the caller) and forecast. Series are independent
//! units of work; [`Pipeline::analyze_many`] runs them in parallel.
//!
//! # Example
//!
//! ```
//! use arima_pipeline::core::Series;
//! use arima_pipeline::pipeline::{OrderOverrides, Pipeline};
//!
//! let values: Vec<f64> = (0..60)
//!     .map(|i| 100.0 + i as f64 * 0.1 + ((i * 7919) % 101) as f64 / 20.0)
//!     .collect();
//! let report = Pipeline::default().analyze(&Series::from_values(values), "ABC", &OrderOverrides::default());
//! assert_eq!(report.name, "ABC");
//! assert!(report.proposal.is_estimated());
//! ```

use crate::core::{Dataset, ForecastWithHistory, Series};
use crate::error::Result;
use crate::models::arima::{
    ArimaForecaster, ArimaOrder, ForecasterConfig, OrderProposal, OrderSelectionConfig,
    OrderSelector,
};
use crate::observe::{default_observer, SharedObserver};
use crate::validation::{StationarityAnalyzer, StationarityConfig, StationarityResult};
use rayon::prelude::*;

/// Configuration for every stage of a [`Pipeline`].
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub stationarity: StationarityConfig,
    pub selection: OrderSelectionConfig,
    pub forecaster: ForecasterConfig,
}

impl PipelineConfig {
    /// Set the stationarity configuration.
    pub fn with_stationarity(mut self, config: StationarityConfig) -> Self {
        self.stationarity = config;
        self
    }

    /// Set the order selection configuration.
    pub fn with_selection(mut self, config: OrderSelectionConfig) -> Self {
        self.selection = config;
        self
    }

    /// Set the forecaster configuration.
    pub fn with_forecaster(mut self, config: ForecasterConfig) -> Self {
        self.forecaster = config;
        self
    }
}

/// Caller-chosen orders replacing the proposed ones, each independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderOverrides {
    pub p: Option<usize>,
    pub d: Option<usize>,
    pub q: Option<usize>,
}

impl OrderOverrides {
    /// Override all three orders.
    pub fn all(p: usize, d: usize, q: usize) -> Self {
        Self {
            p: Some(p),
            d: Some(d),
            q: Some(q),
        }
    }

    pub fn with_p(mut self, p: usize) -> Self {
        self.p = Some(p);
        self
    }

    pub fn with_d(mut self, d: usize) -> Self {
        self.d = Some(d);
        self
    }

    pub fn with_q(mut self, q: usize) -> Self {
        self.q = Some(q);
        self
    }

    /// The orders to fit: overrides where given, proposals elsewhere.
    pub fn apply(&self, proposal: &OrderProposal) -> ArimaOrder {
        ArimaOrder::new(
            self.p.unwrap_or(proposal.p),
            self.d.unwrap_or(proposal.d),
            self.q.unwrap_or(proposal.q),
        )
    }
}

/// Everything the pipeline produced for one series.
#[derive(Debug, Clone)]
pub struct SeriesReport {
    pub name: String,
    pub stationarity: StationarityResult,
    pub proposal: OrderProposal,
    /// Orders actually fitted.
    pub order: ArimaOrder,
    /// Forecast with its history window, or why it could not be produced.
    pub forecast: Result<ForecastWithHistory>,
}

/// Stationarity assessment, order selection and forecasting in sequence.
#[derive(Debug, Clone)]
pub struct Pipeline {
    analyzer: StationarityAnalyzer,
    selector: OrderSelector,
    forecaster: ArimaForecaster,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default(), default_observer())
    }
}

impl Pipeline {
    /// Build a pipeline whose stages all report to `observer`.
    pub fn new(config: PipelineConfig, observer: SharedObserver) -> Self {
        Self {
            analyzer: StationarityAnalyzer::new(config.stationarity, observer.clone()),
            selector: OrderSelector::new(config.selection, observer.clone()),
            forecaster: ArimaForecaster::new(config.forecaster, observer),
        }
    }

    pub fn analyzer(&self) -> &StationarityAnalyzer {
        &self.analyzer
    }

    pub fn selector(&self) -> &OrderSelector {
        &self.selector
    }

    pub fn forecaster(&self) -> &ArimaForecaster {
        &self.forecaster
    }

    /// Analyse a single series.
    pub fn analyze(&self, series: &Series, name: &str, overrides: &OrderOverrides) -> SeriesReport {
        let stationarity = self.analyzer.assess(series, name);
        let proposal = self.selector.select(series);
        let order = overrides.apply(&proposal);
        let forecast = self
            .forecaster
            .forecast_with_history(series, order.p, order.d, order.q);

        SeriesReport {
            name: name.to_string(),
            stationarity,
            proposal,
            order,
            forecast,
        }
    }

    /// Analyse the named series of `dataset` in parallel.
    ///
    /// Reports come back in the order of `names`. Fails only when a name is
    /// not in the dataset; per-series failures live in each report.
    pub fn analyze_many<S: AsRef<str> + Sync>(
        &self,
        dataset: &Dataset,
        names: &[S],
        overrides: &OrderOverrides,
    ) -> Result<Vec<SeriesReport>> {
        let selected = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                dataset.get(name).map(|series| (name, series))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(selected
            .par_iter()
            .map(|(name, series)| self.analyze(series, name, overrides))
            .collect())
    }

    /// Analyse every series of `dataset` in parallel.
    pub fn analyze_all(&self, dataset: &Dataset, overrides: &OrderOverrides) -> Result<Vec<SeriesReport>> {
        self.analyze_many(dataset, dataset.names(), overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;
    use crate::observe::NullObserver;
    use crate::validation::Verdict;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::sync::Arc;

    fn pipeline() -> Pipeline {
        Pipeline::new(PipelineConfig::default(), Arc::new(NullObserver))
    }

    fn walk(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut level = 100.0;
        (0..n)
            .map(|_| {
                level += 0.3 + rng.gen_range(-1.0..1.0);
                level
            })
            .collect()
    }

    fn dataset() -> Dataset {
        let mut dataset = Dataset::new();
        dataset.insert("WALK", Series::from_values(walk(60, 1))).unwrap();
        dataset.insert("FLAT", Series::from_values(vec![50.0; 60])).unwrap();
        dataset.insert("OTHER", Series::from_values(walk(60, 2))).unwrap();
        dataset
    }

    #[test]
    fn overrides_replace_individual_orders() {
        let proposal = OrderProposal {
            p: 2,
            d: 1,
            q: 3,
            curves: None,
            unit_root_trace: vec![],
        };
        assert_eq!(OrderOverrides::default().apply(&proposal), ArimaOrder::new(2, 1, 3));
        assert_eq!(
            OrderOverrides::default().with_d(0).apply(&proposal),
            ArimaOrder::new(2, 0, 3)
        );
        assert_eq!(OrderOverrides::all(1, 1, 1).apply(&proposal), ArimaOrder::new(1, 1, 1));
    }

    #[test]
    fn degenerate_series_report() {
        let report = pipeline().analyze(
            &Series::from_values(vec![50.0; 5]),
            "FLAT",
            &OrderOverrides::default(),
        );
        assert_eq!(report.stationarity.verdict, Verdict::CannotTest);
        assert!(!report.proposal.is_estimated());
        assert_eq!(report.order, ArimaOrder::new(1, 0, 1));
        assert!(matches!(report.forecast, Err(ForecastError::DegenerateInput)));
    }

    #[test]
    fn invalid_override_fails_only_the_forecast() {
        let report = pipeline().analyze(
            &Series::from_values(walk(40, 3)),
            "WALK",
            &OrderOverrides::default().with_p(11),
        );
        assert!(report.stationarity.p_value.is_some());
        assert!(matches!(report.forecast, Err(ForecastError::InvalidParameter(_))));
    }

    #[test]
    fn analyze_many_keeps_input_order() {
        let reports = pipeline()
            .analyze_many(&dataset(), &["OTHER", "FLAT", "WALK"], &OrderOverrides::default())
            .unwrap();
        let names: Vec<&str> = reports.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["OTHER", "FLAT", "WALK"]);
        assert!(reports[0].forecast.is_ok());
        assert!(reports[1].forecast.is_err());
        assert!(reports[2].forecast.is_ok());
    }

    #[test]
    fn analyze_many_matches_sequential() {
        let data = dataset();
        let pipeline = pipeline();
        let parallel = pipeline.analyze_all(&data, &OrderOverrides::default()).unwrap();
        for report in &parallel {
            let single = pipeline.analyze(
                data.get(&report.name).unwrap(),
                &report.name,
                &OrderOverrides::default(),
            );
            assert_eq!(single.stationarity, report.stationarity);
            assert_eq!(single.proposal, report.proposal);
            assert_eq!(single.forecast, report.forecast);
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        let result = pipeline().analyze_many(&dataset(), &["MISSING"], &OrderOverrides::default());
        assert!(matches!(result, Err(ForecastError::UnknownSeries(name)) if name == "MISSING"));
    }
}
