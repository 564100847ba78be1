//! Derivative-free minimisation used for ARIMA parameter estimation.

use std::cmp::Ordering;

/// Result of a Nelder-Mead run.
#[derive(Debug, Clone)]
pub struct NelderMeadResult {
    /// Best point found.
    pub optimal_point: Vec<f64>,
    /// Objective value at `optimal_point`.
    pub optimal_value: f64,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the simplex met the tolerance before `max_iter`.
    pub converged: bool,
}

/// Configuration for Nelder-Mead.
#[derive(Debug, Clone)]
pub struct NelderMeadConfig {
    /// Maximum number of iterations.
    pub max_iter: usize,
    /// Stop when the spread of objective values falls below this.
    pub tolerance: f64,
    /// Reflection coefficient.
    pub alpha: f64,
    /// Expansion coefficient.
    pub gamma: f64,
    /// Contraction coefficient.
    pub rho: f64,
    /// Shrink coefficient.
    pub sigma: f64,
    /// Relative size of the initial simplex.
    pub initial_step: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-8,
            alpha: 1.0,
            gamma: 2.0,
            rho: 0.5,
            sigma: 0.5,
            initial_step: 0.05,
        }
    }
}

impl NelderMeadConfig {
    /// Set the iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Box constraints applied to every trial point.
struct Bounds<'a>(Option<&'a [(f64, f64)]>);

impl Bounds<'_> {
    fn clamp(&self, mut point: Vec<f64>) -> Vec<f64> {
        if let Some(bounds) = self.0 {
            for (x, &(lo, hi)) in point.iter_mut().zip(bounds.iter()) {
                *x = x.clamp(lo, hi);
            }
        }
        point
    }
}

/// Minimise `objective` starting from `initial`.
///
/// Non-finite objective values are treated as `+inf`, so the simplex moves
/// away from regions where the objective cannot be evaluated.
///
/// # Example
/// ```
/// use arima_pipeline::utils::optimization::{nelder_mead, NelderMeadConfig};
///
/// let result = nelder_mead(
///     |x| (x[0] - 2.0).powi(2) + (x[1] + 1.0).powi(2),
///     &[0.0, 0.0],
///     None,
///     NelderMeadConfig::default(),
/// );
/// assert!(result.converged);
/// assert!((result.optimal_point[0] - 2.0).abs() < 0.01);
/// ```
pub fn nelder_mead<F>(
    objective: F,
    initial: &[f64],
    bounds: Option<&[(f64, f64)]>,
    config: NelderMeadConfig,
) -> NelderMeadResult
where
    F: Fn(&[f64]) -> f64,
{
    let n = initial.len();
    if n == 0 {
        return NelderMeadResult {
            optimal_point: vec![],
            optimal_value: f64::NAN,
            iterations: 0,
            converged: false,
        };
    }

    let bounds = Bounds(bounds);
    let eval = |x: &[f64]| {
        let v = objective(x);
        if v.is_finite() {
            v
        } else {
            f64::INFINITY
        }
    };

    // (vertex, value) pairs, kept sorted best-first at the top of each iteration.
    let mut simplex: Vec<(Vec<f64>, f64)> = Vec::with_capacity(n + 1);
    let start = bounds.clamp(initial.to_vec());
    let start_value = eval(&start);
    simplex.push((start, start_value));
    for i in 0..n {
        let mut vertex = initial.to_vec();
        vertex[i] += if initial[i].abs() > 1e-10 {
            config.initial_step * initial[i].abs()
        } else {
            config.initial_step
        };
        let vertex = bounds.clamp(vertex);
        let value = eval(&vertex);
        simplex.push((vertex, value));
    }

    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iter {
        iterations += 1;
        simplex.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

        let best = simplex[0].1;
        let worst = simplex[n].1;
        let second_worst = simplex[n - 1].1;

        if (worst - best).abs() < config.tolerance {
            converged = true;
            break;
        }

        let centroid = centroid(&simplex[..n]);
        let spread = simplex
            .iter()
            .map(|(v, _)| distance(v, &centroid))
            .fold(0.0, f64::max);
        if spread < config.tolerance {
            converged = true;
            break;
        }

        let reflected = bounds.clamp(towards(&centroid, &simplex[n].0, -config.alpha));
        let reflected_value = eval(&reflected);

        if reflected_value < best {
            let expanded = bounds.clamp(towards(&centroid, &reflected, config.gamma));
            let expanded_value = eval(&expanded);
            simplex[n] = if expanded_value < reflected_value {
                (expanded, expanded_value)
            } else {
                (reflected, reflected_value)
            };
            continue;
        }

        if reflected_value < second_worst {
            simplex[n] = (reflected, reflected_value);
            continue;
        }

        // Outside contraction when the reflection beat the worst vertex, inside otherwise.
        let (target, target_value) = if reflected_value < worst {
            (&reflected, reflected_value)
        } else {
            (&simplex[n].0, worst)
        };
        let contracted = bounds.clamp(towards(&centroid, target, config.rho));
        let contracted_value = eval(&contracted);
        if contracted_value < target_value {
            simplex[n] = (contracted, contracted_value);
            continue;
        }

        let anchor = simplex[0].0.clone();
        for (vertex, value) in simplex.iter_mut().skip(1) {
            let shrunk = bounds.clamp(towards(&anchor, vertex, config.sigma));
            *value = eval(&shrunk);
            *vertex = shrunk;
        }
    }

    let (optimal_point, optimal_value) = simplex
        .into_iter()
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
        .unwrap_or((initial.to_vec(), f64::INFINITY));

    NelderMeadResult {
        optimal_point,
        optimal_value,
        iterations,
        converged,
    }
}

fn centroid(vertices: &[(Vec<f64>, f64)]) -> Vec<f64> {
    let dim = vertices[0].0.len();
    let mut c = vec![0.0; dim];
    for (v, _) in vertices {
        for (ci, vi) in c.iter_mut().zip(v.iter()) {
            *ci += vi;
        }
    }
    let count = vertices.len() as f64;
    c.iter_mut().for_each(|ci| *ci /= count);
    c
}

/// `origin + coef * (point - origin)`.
fn towards(origin: &[f64], point: &[f64], coef: f64) -> Vec<f64> {
    origin
        .iter()
        .zip(point.iter())
        .map(|(o, p)| o + coef * (p - o))
        .collect()
}

fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn minimises_quadratic() {
        let result = nelder_mead(
            |x| (x[0] - 2.0).powi(2) + (x[1] - 3.0).powi(2),
            &[0.0, 0.0],
            None,
            NelderMeadConfig::default(),
        );

        assert!(result.converged);
        assert_relative_eq!(result.optimal_point[0], 2.0, epsilon = 1e-3);
        assert_relative_eq!(result.optimal_point[1], 3.0, epsilon = 1e-3);
    }

    #[test]
    fn respects_bounds() {
        let result = nelder_mead(
            |x| (x[0] - 5.0).powi(2),
            &[0.5],
            Some(&[(-0.99, 0.99)]),
            NelderMeadConfig::default(),
        );

        assert_relative_eq!(result.optimal_point[0], 0.99, epsilon = 1e-4);
    }

    #[test]
    fn recovers_ar1_coefficient_from_css() {
        use rand::{rngs::StdRng, Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(7);
        let mut x = vec![0.0; 500];
        for t in 1..500 {
            x[t] = 0.6 * x[t - 1] + rng.gen_range(-1.0..1.0);
        }
        let css = |phi: &[f64]| {
            (1..x.len())
                .map(|t| (x[t] - phi[0] * x[t - 1]).powi(2))
                .sum::<f64>()
        };

        let result = nelder_mead(css, &[0.1], Some(&[(-0.99, 0.99)]), NelderMeadConfig::default());
        assert!((result.optimal_point[0] - 0.6).abs() < 0.15);
    }

    #[test]
    fn non_finite_objective_is_avoided() {
        let result = nelder_mead(
            |x| if x[0] < 0.0 { f64::NAN } else { (x[0] - 1.0).powi(2) },
            &[0.5],
            None,
            NelderMeadConfig::default(),
        );
        assert!(result.optimal_value.is_finite());
        assert_relative_eq!(result.optimal_point[0], 1.0, epsilon = 1e-3);
    }

    #[test]
    fn empty_start_does_not_converge() {
        let result = nelder_mead(|_| 0.0, &[], None, NelderMeadConfig::default());
        assert!(!result.converged);
        assert!(result.optimal_point.is_empty());
    }
}
