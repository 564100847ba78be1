//! Ordinary Least Squares regression for the unit-root test.
//!
//! The design matrix is passed column by column and must contain any
//! constant term explicitly. Coefficient standard errors come from the
//! diagonal of `σ² (X'X)⁻¹`, solved with a Cholesky factorisation of the
//! normal equations.

use crate::error::{ForecastError, Result};
use std::f64::consts::PI;

/// Relative pivot size below which `X'X` is treated as singular.
const SINGULAR_TOL: f64 = 1e-12;

/// Fitted OLS regression.
#[derive(Debug, Clone)]
pub struct OlsFit {
    /// One coefficient per design column.
    pub coefficients: Vec<f64>,
    /// Standard error of each coefficient.
    pub standard_errors: Vec<f64>,
    /// Residual sum of squares.
    pub ssr: f64,
    /// Uncentered sum of squares of the response.
    pub yss: f64,
    /// Number of observations.
    pub nobs: usize,
}

impl OlsFit {
    /// t-statistic of coefficient `i`.
    pub fn t_value(&self, i: usize) -> f64 {
        self.coefficients[i] / self.standard_errors[i]
    }

    /// Gaussian log-likelihood at the OLS estimate.
    pub fn log_likelihood(&self) -> f64 {
        let n = self.nobs as f64;
        -0.5 * n * ((2.0 * PI).ln() + (self.ssr / n).ln() + 1.0)
    }

    /// Akaike information criterion, counting every design column.
    pub fn aic(&self) -> f64 {
        -2.0 * self.log_likelihood() + 2.0 * self.coefficients.len() as f64
    }

    /// True when the regressors reproduce the response (numerically) exactly.
    ///
    /// Residuals are measured against the magnitude of the response, so a
    /// constant response fitted by a constant term counts as exact.
    pub fn is_exact_fit(&self) -> bool {
        self.ssr <= SINGULAR_TOL * self.yss
    }
}

/// Fit `y = X β + ε` where `columns[j]` is the j-th column of `X`.
pub fn ols_fit(y: &[f64], columns: &[Vec<f64>]) -> Result<OlsFit> {
    let n = y.len();
    let k = columns.len();

    if k == 0 {
        return Err(ForecastError::InvalidParameter(
            "design matrix has no columns".into(),
        ));
    }
    for column in columns {
        if column.len() != n {
            return Err(ForecastError::DimensionMismatch {
                expected: n,
                got: column.len(),
            });
        }
    }
    if n <= k {
        return Err(ForecastError::InsufficientData {
            needed: k + 1,
            got: n,
        });
    }

    let mut xtx = vec![vec![0.0; k]; k];
    let mut xty = vec![0.0; k];
    for i in 0..k {
        for j in 0..=i {
            let s: f64 = columns[i]
                .iter()
                .zip(columns[j].iter())
                .map(|(a, b)| a * b)
                .sum();
            xtx[i][j] = s;
            xtx[j][i] = s;
        }
        xty[i] = columns[i].iter().zip(y.iter()).map(|(a, b)| a * b).sum();
    }

    let chol = cholesky(&xtx).ok_or_else(|| {
        ForecastError::ComputationError("singular design matrix in OLS regression".into())
    })?;
    let coefficients = cholesky_solve(&chol, &xty);

    let mut ssr = 0.0;
    for t in 0..n {
        let fitted: f64 = (0..k).map(|j| columns[j][t] * coefficients[j]).sum();
        ssr += (y[t] - fitted).powi(2);
    }
    let yss = y.iter().map(|v| v * v).sum::<f64>();

    let sigma2 = ssr / (n - k) as f64;
    let standard_errors = (0..k)
        .map(|i| {
            let mut unit = vec![0.0; k];
            unit[i] = 1.0;
            let column = cholesky_solve(&chol, &unit);
            (sigma2 * column[i]).sqrt()
        })
        .collect();

    Ok(OlsFit {
        coefficients,
        standard_errors,
        ssr,
        yss,
        nobs: n,
    })
}

/// Lower-triangular Cholesky factor of a symmetric positive definite matrix.
fn cholesky(a: &[Vec<f64>]) -> Option<Vec<Vec<f64>>> {
    let n = a.len();
    let mut l = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }

            if i == j {
                if !(sum > SINGULAR_TOL * a[i][i].abs()) {
                    return None;
                }
                l[i][j] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    Some(l)
}

/// Solve `L L' x = b` given the Cholesky factor `L`.
fn cholesky_solve(l: &[Vec<f64>], b: &[f64]) -> Vec<f64> {
    let n = b.len();

    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[i][j] * y[j];
        }
        y[i] = sum / l[i][i];
    }

    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in (i + 1)..n {
            sum -= l[j][i] * x[j];
        }
        x[i] = sum / l[i][i];
    }

    x
}
