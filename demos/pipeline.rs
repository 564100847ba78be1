//! Analyse a wide CSV of price series (or a synthetic one) and print the
//! stationarity verdicts, proposed orders and week-ahead forecasts.
//!
//! ```text
//! cargo run --example pipeline -- prices.csv
//! RUST_LOG=arima_pipeline=debug cargo run --example pipeline
//! ```

use arima_pipeline::prelude::*;
use arima_pipeline::summary::{describe, most_volatile};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::error::Error;
use std::fs::File;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Three drifting walks and one flat line, 100 days each.
fn synthetic_dataset() -> Result<Dataset> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut dataset = Dataset::new();
    for (name, start, drift) in [("RELIANCE", 2400.0, 1.5), ("TCS", 3500.0, -0.8), ("INFY", 1450.0, 0.3)] {
        let mut level = start;
        let values = (0..100)
            .map(|_| {
                level += drift + rng.gen_range(-20.0..20.0);
                level
            })
            .collect();
        dataset.insert(name, Series::from_values(values))?;
    }
    dataset.insert("PEGGED", Series::from_values(vec![100.0; 100]))?;
    Ok(dataset)
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arima_pipeline=info".into()),
        )
        .init();

    let dataset = match std::env::args().nth(1) {
        Some(path) => Dataset::from_wide_csv(File::open(path)?)?,
        None => synthetic_dataset()?,
    };

    println!("{:<12} {:>10} {:>10} {:>12}", "Series", "Mean", "Std", "Volatility");
    for (name, series) in dataset.iter() {
        let summary = describe(&series.tail(30))?;
        let volatility = summary
            .volatility
            .map_or_else(|| "n/a".to_string(), |v| format!("{:.2}%", v));
        println!(
            "{:<12} {:>10.2} {:>10.2} {:>12}",
            name, summary.mean, summary.std, volatility
        );
    }
    if let Some((name, volatility)) = most_volatile(&dataset, dataset.names(), 30)? {
        println!("\n{} is the most volatile series ({:.2}%)", name, volatility);
    }

    let reports = Pipeline::default().analyze_all(&dataset, &OrderOverrides::default())?;
    for report in reports {
        println!("\n== {} ==", report.name);
        match report.stationarity.p_value {
            Some(p) => println!("ADF p-value {:.4}: {}", p, report.stationarity.verdict),
            None => println!("{}", report.stationarity.verdict),
        }
        println!(
            "ARIMA({}, {}, {}){}",
            report.order.p,
            report.order.d,
            report.order.q,
            if report.proposal.is_estimated() { "" } else { " (default)" }
        );
        if let Some(curves) = &report.proposal.curves {
            println!("  {:<4} {:>8} {:>8}", "Lag", "ACF", "PACF");
            for ((lag, a), p) in curves.lags().zip(&curves.acf).zip(&curves.pacf).take(5) {
                println!("  {:<4} {:>8.3} {:>8.3}", lag, a, p);
            }
        }
        match report.forecast {
            Ok(result) => {
                for (label, value) in result.forecast.iter() {
                    println!("  {:<8} {:>10.2}", label.to_string(), value);
                }
            }
            Err(err) => println!("  {}", err),
        }
    }

    Ok(())
}
