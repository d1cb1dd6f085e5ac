use serde::{Deserialize, Serialize};

use super::defaults;

/// Aki maximum-likelihood b-value estimation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BValueEstimation {
    /// Minimum number of events at or above the floor for an estimate.
    pub min_events: usize,
    /// b-value used when the sample is too small or degenerate.
    pub fallback: f64,
}

impl Default for BValueEstimation {
    fn default() -> Self {
        Self {
            min_events: defaults::DEFAULT_B_MIN_EVENTS,
            fallback: defaults::DEFAULT_B_VALUE,
        }
    }
}

/// Bounded least-squares Omori fit settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OmoriFitConfig {
    /// Minimum number of aftershocks in the histogram span for a fit.
    pub min_events: usize,
    /// Number of one-day histogram bins after the mainshock.
    pub histogram_days: usize,
    pub max_iterations: usize,
    pub k_bounds: [f64; 2],
    pub c_bounds: [f64; 2],
    pub p_bounds: [f64; 2],
    pub fallback_k: f64,
    pub fallback_c: f64,
    pub fallback_p: f64,
}

impl Default for OmoriFitConfig {
    fn default() -> Self {
        Self {
            min_events: defaults::DEFAULT_OMORI_MIN_EVENTS,
            histogram_days: defaults::DEFAULT_HISTOGRAM_DAYS,
            max_iterations: defaults::DEFAULT_FIT_MAX_ITERATIONS,
            k_bounds: defaults::DEFAULT_K_BOUNDS,
            c_bounds: defaults::DEFAULT_C_BOUNDS,
            p_bounds: defaults::DEFAULT_P_BOUNDS,
            fallback_k: defaults::DEFAULT_FALLBACK_K,
            fallback_c: defaults::DEFAULT_FALLBACK_C,
            fallback_p: defaults::DEFAULT_FALLBACK_P,
        }
    }
}

/// Parameter estimation from a regional catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationConfig {
    pub b_value: BValueEstimation,
    pub omori_fit: OmoriFitConfig,
}
