use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::window::ForecastWindow;

/// Largest `f64` strictly below 1.0. Finite λ never reports certainty.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// Poisson probability of at least one event: `1 - exp(-λ)`.
///
/// Computed as `-expm1(-λ)` so small λ keep full precision and λ = 0 gives
/// exactly 0.
pub fn occurrence_probability(expected_count: f64) -> f64 {
    if expected_count <= 0.0 {
        return 0.0;
    }
    (-(-expected_count).exp_m1()).clamp(0.0, BELOW_ONE)
}

/// Intermediate quantities of a forecast, for inspection and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastBreakdown {
    /// Productivity K after magnitude scaling.
    pub productivity: f64,
    /// Omori expected count of all aftershocks above the completeness floor.
    pub total_count: f64,
    /// Gutenberg–Richter fraction at or above the threshold.
    pub exceedance_fraction: f64,
    /// Catalog events in the spatial-temporal neighborhood.
    pub neighborhood_size: usize,
    /// Whether λ was reduced to `max_expected_count`.
    pub capped: bool,
}

/// Outcome of one forecast query. Recomputed per query, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Expected number of qualifying aftershocks (λ ≥ 0).
    pub expected_count: f64,
    /// `1 - exp(-expected_count)`.
    pub probability: f64,
    pub magnitude_threshold: f64,
    pub window: ForecastWindow,
    pub breakdown: ForecastBreakdown,
}

impl ForecastResult {
    /// Result for a neighborhood with no events: λ = 0, probability = 0.
    pub fn empty(window: ForecastWindow, magnitude_threshold: f64) -> Self {
        Self {
            expected_count: 0.0,
            probability: 0.0,
            magnitude_threshold,
            window,
            breakdown: ForecastBreakdown {
                productivity: 0.0,
                total_count: 0.0,
                exceedance_fraction: 0.0,
                neighborhood_size: 0,
                capped: false,
            },
        }
    }

    pub fn window_start(&self) -> DateTime<Utc> {
        self.window.start
    }

    pub fn window_end(&self) -> DateTime<Utc> {
        self.window.end
    }

    /// Whether two results describe the same window and threshold, i.e. are
    /// directly comparable.
    pub fn same_window(&self, other: &ForecastResult) -> bool {
        self.window == other.window && self.magnitude_threshold == other.magnitude_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_count_gives_zero_probability() {
        assert_eq!(occurrence_probability(0.0), 0.0);
    }

    #[test]
    fn matches_closed_form() {
        for lambda in [1e-9_f64, 0.01, 0.47, 1.0, 3.5] {
            let expected = 1.0 - (-lambda).exp();
            assert!((occurrence_probability(lambda) - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn never_reaches_one() {
        assert!(occurrence_probability(50.0) < 1.0);
        assert!(occurrence_probability(1e12) < 1.0);
    }
}
