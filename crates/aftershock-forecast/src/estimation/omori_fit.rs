//! Bounded least-squares fit of the Omori rate to daily aftershock counts.

use aftershock_core::config::OmoriFitConfig;
use aftershock_core::time::days_between;
use aftershock_core::EarthquakeEvent;
use tracing::debug;

use super::EstimateSource;
use crate::omori;

/// Fitted (or fallback) Omori parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OmoriFit {
    pub k: f64,
    pub c: f64,
    pub p: f64,
    /// Aftershocks inside the histogram span.
    pub sample_size: usize,
    /// Sum of squared residuals at the returned parameters.
    pub residual: f64,
    pub source: EstimateSource,
}

/// Fits `λ(t) = K / (c + t)^p` to one-day histogram bins with a projected
/// Levenberg–Marquardt iteration that keeps every parameter inside its bounds.
#[derive(Debug, Clone)]
pub struct OmoriFitter {
    config: OmoriFitConfig,
}

impl OmoriFitter {
    pub fn new(config: OmoriFitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OmoriFitConfig {
        &self.config
    }

    /// Fit the sequence following `mainshock`. Only events strictly after the
    /// mainshock contribute.
    pub fn fit_sequence<'a>(
        &self,
        mainshock: &EarthquakeEvent,
        events: impl IntoIterator<Item = &'a EarthquakeEvent>,
    ) -> OmoriFit {
        let offsets: Vec<f64> = events
            .into_iter()
            .filter(|e| e.time > mainshock.time)
            .map(|e| days_between(mainshock.time, e.time))
            .collect();
        self.fit(&offsets)
    }

    /// Fit aftershock offsets (days after the mainshock).
    pub fn fit(&self, offsets_days: &[f64]) -> OmoriFit {
        let counts = self.histogram(offsets_days);
        let sample_size = counts.iter().sum::<f64>() as usize;
        if sample_size < self.config.min_events {
            debug!(
                sample_size,
                min_events = self.config.min_events,
                "too few aftershocks for an Omori fit"
            );
            return self.fallback(&counts, sample_size);
        }
        match self.fit_histogram(&counts) {
            Some((k, c, p, residual)) => OmoriFit {
                k,
                c,
                p,
                sample_size,
                residual,
                source: EstimateSource::Estimated,
            },
            None => {
                debug!(sample_size, "Omori fit did not converge");
                self.fallback(&counts, sample_size)
            }
        }
    }

    /// Daily counts: bin `i` holds offsets in `[i, i + 1)` days. Offsets that
    /// are not strictly positive or fall beyond the span are dropped.
    pub fn histogram(&self, offsets_days: &[f64]) -> Vec<f64> {
        let bins = self.config.histogram_days;
        let mut counts = vec![0.0; bins];
        for &offset in offsets_days {
            if !(offset.is_finite() && offset > 0.0) {
                continue;
            }
            let bin = offset.floor() as usize;
            if bin < bins {
                counts[bin] += 1.0;
            }
        }
        counts
    }

    /// Least-squares fit of daily counts evaluated at bin midpoints.
    ///
    /// Parameters sitting on a bound with the gradient pointing outward are
    /// held fixed for that step, so the iteration does not crawl along an
    /// active bound. When the iteration budget runs out the best iterate is
    /// kept; it never costs more than the configured fallback triple.
    /// Returns `(K, c, p, residual)`, or `None` when no finite fit exists.
    pub fn fit_histogram(&self, counts: &[f64]) -> Option<(f64, f64, f64, f64)> {
        let times: Vec<f64> = (0..counts.len()).map(|i| i as f64 + 0.5).collect();
        let lower = [
            self.config.k_bounds[0],
            self.config.c_bounds[0],
            self.config.p_bounds[0],
        ];
        let upper = [
            self.config.k_bounds[1],
            self.config.c_bounds[1],
            self.config.p_bounds[1],
        ];
        let project = |theta: [f64; 3]| -> [f64; 3] {
            [
                theta[0].clamp(lower[0], upper[0]),
                theta[1].clamp(lower[1], upper[1]),
                theta[2].clamp(lower[2], upper[2]),
            ]
        };

        // Fallback shape scaled to the first bin, or the fallback itself.
        let c0 = self.config.fallback_c;
        let p0 = self.config.fallback_p;
        let first = counts.first().copied().unwrap_or(0.0).max(1.0);
        let scaled = project([first * (c0 + 0.5).powf(p0), c0, p0]);
        let fallback = project([self.config.fallback_k, c0, p0]);
        let (mut theta, mut cost) = [scaled, fallback]
            .into_iter()
            .map(|theta| (theta, sum_of_squares(&theta, &times, counts)))
            .filter(|(_, cost)| cost.is_finite())
            .min_by(|a, b| a.1.total_cmp(&b.1))?;
        let mut damping = 1e-3;
        let mut iterations = 0;
        let mut settled = false;

        while iterations < self.config.max_iterations {
            iterations += 1;
            let (normal, gradient) = normal_equations(&theta, &times, counts);
            if !gradient.iter().all(|g| g.is_finite()) {
                break;
            }

            let free: [bool; 3] = std::array::from_fn(|i| {
                let pinned_low = theta[i] <= lower[i] && gradient[i] > 0.0;
                let pinned_high = theta[i] >= upper[i] && gradient[i] < 0.0;
                !(pinned_low || pinned_high)
            });
            if !free.iter().any(|f| *f) {
                settled = true;
                break;
            }

            let mut damped = normal;
            let mut rhs = [0.0; 3];
            for i in 0..3 {
                if free[i] {
                    damped[i][i] += damping * normal[i][i].max(1e-12);
                    rhs[i] = -gradient[i];
                } else {
                    for j in 0..3 {
                        damped[i][j] = 0.0;
                        damped[j][i] = 0.0;
                    }
                    damped[i][i] = 1.0;
                }
            }

            let step = match solve3(damped, rhs) {
                Some(step) => step,
                None => {
                    damping *= 10.0;
                    if damping > 1e12 {
                        break;
                    }
                    continue;
                }
            };

            let candidate = project([theta[0] + step[0], theta[1] + step[1], theta[2] + step[2]]);
            let candidate_cost = sum_of_squares(&candidate, &times, counts);

            if candidate_cost.is_finite() && candidate_cost < cost {
                let improvement = cost - candidate_cost;
                let stalled = (0..3).all(|i| {
                    (candidate[i] - theta[i]).abs() <= 1e-10 * (1.0 + theta[i].abs())
                });
                theta = candidate;
                cost = candidate_cost;
                damping = (damping / 3.0).max(1e-12);
                if improvement <= 1e-12 * (1.0 + cost) || stalled {
                    settled = true;
                    break;
                }
            } else {
                damping *= 4.0;
                // No descent direction left inside the bounds.
                if damping > 1e12 {
                    settled = true;
                    break;
                }
            }
        }

        if !settled {
            debug!(iterations, cost, "Omori fit stopped before converging, keeping best iterate");
        }
        let finite = theta.iter().all(|v| v.is_finite()) && cost.is_finite();
        finite.then_some((theta[0], theta[1], theta[2], cost))
    }

    fn fallback(&self, counts: &[f64], sample_size: usize) -> OmoriFit {
        let theta = [
            self.config.fallback_k,
            self.config.fallback_c,
            self.config.fallback_p,
        ];
        let times: Vec<f64> = (0..counts.len()).map(|i| i as f64 + 0.5).collect();
        OmoriFit {
            k: theta[0],
            c: theta[1],
            p: theta[2],
            sample_size,
            residual: sum_of_squares(&theta, &times, counts),
            source: EstimateSource::Fallback,
        }
    }
}

fn sum_of_squares(theta: &[f64; 3], times: &[f64], counts: &[f64]) -> f64 {
    times
        .iter()
        .zip(counts)
        .map(|(&t, &y)| (omori::rate(theta[0], theta[1], theta[2], t) - y).powi(2))
        .sum()
}

/// `JᵀJ` and `Jᵀr` for residuals `r = λ(t) - y`.
fn normal_equations(theta: &[f64; 3], times: &[f64], counts: &[f64]) -> ([[f64; 3]; 3], [f64; 3]) {
    let [k, c, p] = *theta;
    let mut normal = [[0.0; 3]; 3];
    let mut gradient = [0.0; 3];

    for (&t, &y) in times.iter().zip(counts) {
        let u = c + t;
        let decay = u.powf(-p);
        let model = k * decay;
        let residual = model - y;
        let jacobian = [decay, -p * model / u, -model * u.ln()];

        for i in 0..3 {
            gradient[i] += jacobian[i] * residual;
            for j in 0..3 {
                normal[i][j] += jacobian[i] * jacobian[j];
            }
        }
    }
    (normal, gradient)
}

/// Gaussian elimination with partial pivoting for a 3×3 system.
fn solve3(mut a: [[f64; 3]; 3], mut b: [f64; 3]) -> Option<[f64; 3]> {
    for col in 0..3 {
        let pivot = (col..3).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if a[pivot][col].abs() < 1e-300 {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..3 {
            let factor = a[row][col] / a[col][col];
            for k in col..3 {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = [0.0; 3];
    for row in (0..3).rev() {
        let tail: f64 = (row + 1..3).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    x.iter().all(|v| v.is_finite()).then_some(x)
}
