//! Autocorrelation and partial autocorrelation functions.

use crate::utils::stats::mean;

/// Autocorrelation at a single lag (divide-by-n autocovariance).
///
/// # Arguments
/// * `series` - Input time series
/// * `lag` - Lag value
pub fn autocorrelation(series: &[f64], lag: usize) -> f64 {
    if series.len() <= lag {
        return f64::NAN;
    }

    let m = mean(series);
    let mut numerator = 0.0;
    let mut denominator = 0.0;

    for (i, &x) in series.iter().enumerate() {
        denominator += (x - m).powi(2);
        if i >= lag {
            numerator += (x - m) * (series[i - lag] - m);
        }
    }

    if denominator < 1e-10 {
        return 0.0;
    }

    numerator / denominator
}

/// Autocorrelation function for lags `0..=max_lag`.
///
/// Lags beyond `series.len() - 1` are not returned.
pub fn acf(series: &[f64], max_lag: usize) -> Vec<f64> {
    if series.is_empty() {
        return vec![];
    }
    let max_lag = max_lag.min(series.len() - 1);
    (0..=max_lag)
        .map(|lag| autocorrelation(series, lag))
        .collect()
}

/// Autocovariances for lags `0..=max_lag`, each normalised by the number of
/// products it sums (`n - k`).
fn adjusted_autocovariance(series: &[f64], max_lag: usize) -> Vec<f64> {
    let n = series.len();
    let m = mean(series);
    let centered: Vec<f64> = series.iter().map(|x| x - m).collect();

    (0..=max_lag)
        .map(|k| {
            let sum: f64 = centered[k..]
                .iter()
                .zip(centered.iter())
                .map(|(a, b)| a * b)
                .sum();
            sum / (n - k) as f64
        })
        .collect()
}

/// Partial autocorrelation function for lags `0..=max_lag`.
///
/// Yule-Walker estimates from adjusted autocovariances, solved for every order
/// at once with the Durbin-Levinson recursion. The value at lag `k` is the last
/// coefficient of the order-`k` autoregression. Lags past a numerically
/// singular step are `NaN`.
pub fn pacf(series: &[f64], max_lag: usize) -> Vec<f64> {
    let n = series.len();
    if n == 0 {
        return vec![];
    }
    let max_lag = max_lag.min(n - 1);

    let gamma = adjusted_autocovariance(series, max_lag);
    if gamma[0] < 1e-10 {
        let mut flat = vec![0.0; max_lag + 1];
        flat[0] = 1.0;
        return flat;
    }
    let rho: Vec<f64> = gamma.iter().map(|g| g / gamma[0]).collect();

    let mut result = Vec::with_capacity(max_lag + 1);
    result.push(1.0);

    // phi[j - 1] holds the lag-j coefficient of the current order.
    let mut phi: Vec<f64> = Vec::with_capacity(max_lag);
    for k in 1..=max_lag {
        let mut num = rho[k];
        let mut denom = 1.0;
        for j in 1..k {
            num -= phi[j - 1] * rho[k - j];
            denom -= phi[j - 1] * rho[j];
        }

        if denom.abs() < 1e-10 {
            result.resize(max_lag + 1, f64::NAN);
            break;
        }

        let phi_kk = num / denom;
        let next: Vec<f64> = (1..k)
            .map(|j| phi[j - 1] - phi_kk * phi[k - j - 1])
            .chain(std::iter::once(phi_kk))
            .collect();
        phi = next;
        result.push(phi_kk);
    }

    result
}
