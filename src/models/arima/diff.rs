//! Differencing utilities for ARIMA models.

/// Apply differencing to a time series.
///
/// # Arguments
/// * `series` - The input series
/// * `d` - Differencing order (number of times to difference)
///
/// # Returns
/// The differenced series, `d` observations shorter (never shorter than one
/// observation unless the input is empty).
pub fn difference(series: &[f64], d: usize) -> Vec<f64> {
    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() <= 1 {
            break;
        }
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// Integrate (reverse differencing) forecasts made on the differenced scale.
///
/// # Arguments
/// * `differenced` - Future values of the `d`-times differenced series
/// * `original` - The observed series on the original scale
/// * `d` - Differencing order used
///
/// # Returns
/// The continuation of `original` implied by `differenced`.
pub fn integrate(differenced: &[f64], original: &[f64], d: usize) -> Vec<f64> {
    let mut result = differenced.to_vec();

    // Undo one level at a time, anchoring each cumulative sum on the last
    // observed value of the intermediate difference.
    for level in (0..d).rev() {
        let anchor = difference(original, level).last().copied().unwrap_or(0.0);
        result = result
            .iter()
            .scan(anchor, |acc, step| {
                *acc += step;
                Some(*acc)
            })
            .collect();
    }

    result
}
