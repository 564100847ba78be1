//! Benchmarks for the analysis stages.

use arima_pipeline::core::{Dataset, Series};
use arima_pipeline::features::{acf, pacf};
use arima_pipeline::models::arima::{ArimaForecaster, OrderSelector};
use arima_pipeline::observe::NullObserver;
use arima_pipeline::pipeline::{OrderOverrides, Pipeline, PipelineConfig};
use arima_pipeline::validation::adf_test;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Arc;

fn generate_walk(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut level = 100.0;
    (0..n)
        .map(|_| {
            level += 0.2 + rng.gen_range(-1.0..1.0);
            level
        })
        .collect()
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");
    let selector = OrderSelector::new(Default::default(), Arc::new(NullObserver));
    let forecaster = ArimaForecaster::new(Default::default(), Arc::new(NullObserver));

    for size in [100, 250, 500, 1000].iter() {
        let values = generate_walk(*size, 7);
        let series = Series::from_values(values.clone());

        group.bench_with_input(BenchmarkId::new("adf", size), size, |b, _| {
            b.iter(|| adf_test(black_box(&values), None))
        });

        group.bench_with_input(BenchmarkId::new("acf_pacf", size), size, |b, _| {
            b.iter(|| (acf(black_box(&values), 20), pacf(black_box(&values), 20)))
        });

        group.bench_with_input(BenchmarkId::new("select", size), size, |b, _| {
            b.iter(|| selector.select(black_box(&series)))
        });

        group.bench_with_input(BenchmarkId::new("forecast_111", size), size, |b, _| {
            b.iter(|| forecaster.forecast(black_box(&series), 1, 1, 1))
        });
    }

    group.finish();
}

fn bench_dataset(c: &mut Criterion) {
    let mut dataset = Dataset::new();
    for i in 0..16 {
        dataset
            .insert(format!("S{}", i), Series::from_values(generate_walk(100, i)))
            .unwrap();
    }
    let pipeline = Pipeline::new(PipelineConfig::default(), Arc::new(NullObserver));

    c.bench_function("analyze_all_16x100", |b| {
        b.iter(|| pipeline.analyze_all(black_box(&dataset), &OrderOverrides::default()))
    });
}

criterion_group!(benches, bench_stages, bench_dataset);
criterion_main!(benches);
