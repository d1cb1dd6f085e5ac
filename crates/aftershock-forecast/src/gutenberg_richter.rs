use aftershock_core::errors::{AftershockError, AftershockResult};

/// Gutenberg–Richter exceedance fraction:
///
/// ```text
/// F = 10^(-b × (M_thr - M0))
/// ```
///
/// `P(M >= magnitude_threshold | event above the floor M0)`. Thresholds at or
/// below the floor give exactly 1. Range: 0.0 – 1.0.
pub fn exceedance_fraction(
    b: f64,
    magnitude_threshold: f64,
    floor_magnitude: f64,
) -> AftershockResult<f64> {
    if !(b.is_finite() && b > 0.0) {
        return Err(AftershockError::invalid("b", b, "must be finite and > 0"));
    }
    if !magnitude_threshold.is_finite() {
        return Err(AftershockError::invalid(
            "magnitude_threshold",
            magnitude_threshold,
            "must be finite",
        ));
    }
    if !floor_magnitude.is_finite() {
        return Err(AftershockError::invalid(
            "completeness_magnitude",
            floor_magnitude,
            "must be finite",
        ));
    }
    if magnitude_threshold <= floor_magnitude {
        return Ok(1.0);
    }
    Ok(10f64
        .powf(-b * (magnitude_threshold - floor_magnitude))
        .clamp(0.0, 1.0))
}
