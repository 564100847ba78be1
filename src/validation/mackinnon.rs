//! MacKinnon response-surface approximations for the Dickey-Fuller
//! distribution (single series, regression with a constant).
//!
//! p-values follow MacKinnon (1994), critical values MacKinnon (2010).

use crate::utils::stats::normal_cdf;

/// Above this statistic the p-value is 1.
const TAU_MAX: f64 = 2.74;
/// Below this statistic the p-value is 0.
const TAU_MIN: f64 = -18.83;
/// Switch point between the small-p and large-p polynomials.
const TAU_STAR: f64 = -1.61;

const SMALL_P: [f64; 3] = [2.1659, 1.4412, 0.038269];
const LARGE_P: [f64; 4] = [1.7339, 0.93202, -0.12745, -0.010368];

/// Response-surface coefficients in `1/nobs` for the 1 %, 5 % and 10 % levels.
const CRIT_1PCT: [f64; 4] = [-3.43035, -6.5393, -16.786, -79.433];
const CRIT_5PCT: [f64; 4] = [-2.86154, -2.8903, -4.234, -40.040];
const CRIT_10PCT: [f64; 4] = [-2.56677, -1.5384, -2.809, 0.0];

/// Critical values at the 1 %, 5 % and 10 % significance levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalValues {
    pub cv_1pct: f64,
    pub cv_5pct: f64,
    pub cv_10pct: f64,
}

impl CriticalValues {
    /// `(level, value)` pairs, most significant first.
    pub fn as_pairs(&self) -> [(&'static str, f64); 3] {
        [
            ("1%", self.cv_1pct),
            ("5%", self.cv_5pct),
            ("10%", self.cv_10pct),
        ]
    }
}

/// Evaluate `c[0] + c[1] x + c[2] x² + …`.
fn polyval(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Approximate p-value of an ADF statistic.
pub fn p_value(statistic: f64) -> f64 {
    if statistic.is_nan() {
        return f64::NAN;
    }
    if statistic > TAU_MAX {
        return 1.0;
    }
    if statistic < TAU_MIN {
        return 0.0;
    }
    let coefficients: &[f64] = if statistic <= TAU_STAR {
        &SMALL_P
    } else {
        &LARGE_P
    };
    normal_cdf(polyval(coefficients, statistic))
}

/// Finite-sample critical values for a regression on `nobs` observations.
pub fn critical_values(nobs: usize) -> CriticalValues {
    let inv = 1.0 / nobs as f64;
    CriticalValues {
        cv_1pct: polyval(&CRIT_1PCT, inv),
        cv_5pct: polyval(&CRIT_5PCT, inv),
        cv_10pct: polyval(&CRIT_10PCT, inv),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn polyval_is_ascending_order() {
        assert_relative_eq!(polyval(&[1.0, 2.0, 3.0], 2.0), 17.0);
    }

    #[test]
    fn five_percent_critical_value_maps_to_five_percent() {
        assert_relative_eq!(p_value(-2.86), 0.05, epsilon = 2e-3);
    }

    #[test]
    fn p_value_is_monotone() {
        let stats = [-6.0, -4.0, -3.0, -2.0, -1.61, -1.0, 0.0, 1.0, 2.0];
        let ps: Vec<f64> = stats.iter().map(|&s| p_value(s)).collect();
        for pair in ps.windows(2) {
            assert!(pair[0] <= pair[1], "p-values not monotone: {:?}", ps);
        }
    }

    #[test]
    fn p_value_saturates() {
        assert_eq!(p_value(3.0), 1.0);
        assert_eq!(p_value(-20.0), 0.0);
        assert!(p_value(f64::NAN).is_nan());
    }

    #[test]
    fn critical_values_approach_asymptotes() {
        let cv = critical_values(1_000_000);
        assert_relative_eq!(cv.cv_1pct, -3.43035, epsilon = 1e-4);
        assert_relative_eq!(cv.cv_5pct, -2.86154, epsilon = 1e-4);
        assert_relative_eq!(cv.cv_10pct, -2.56677, epsilon = 1e-4);

        let small = critical_values(100);
        assert!(small.cv_1pct < small.cv_5pct && small.cv_5pct < small.cv_10pct);
        assert!(small.cv_5pct < cv.cv_5pct);
    }
}
