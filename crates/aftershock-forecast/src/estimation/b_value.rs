use aftershock_core::config::BValueEstimation;

use super::EstimateSource;

/// Result of a b-value estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BValueEstimate {
    pub b: f64,
    /// Events at or above the floor.
    pub sample_size: usize,
    pub source: EstimateSource,
}

/// Aki maximum-likelihood b-value:
///
/// ```text
/// b = log10(e) / (mean(M >= m_min) - m_min)
/// ```
///
/// Falls back to `settings.fallback` with fewer than `settings.min_events`
/// samples or when the mean does not exceed the floor.
pub fn aki_b_value(
    magnitudes: impl IntoIterator<Item = f64>,
    m_min: f64,
    settings: &BValueEstimation,
) -> BValueEstimate {
    let (sum, count) = magnitudes
        .into_iter()
        .filter(|m| m.is_finite() && *m >= m_min)
        .fold((0.0, 0usize), |(sum, count), m| (sum + m, count + 1));

    let fallback = BValueEstimate {
        b: settings.fallback,
        sample_size: count,
        source: EstimateSource::Fallback,
    };
    if count == 0 || count < settings.min_events {
        return fallback;
    }

    let spread = sum / count as f64 - m_min;
    if !(spread.is_finite() && spread > 0.0) {
        return fallback;
    }
    BValueEstimate {
        b: std::f64::consts::LOG10_E / spread,
        sample_size: count,
        source: EstimateSource::Estimated,
    }
}
