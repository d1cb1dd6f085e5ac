//! Modified Omori law: aftershock rate `λ(t) = K / (c + t)^p`.

use aftershock_core::errors::{AftershockError, AftershockResult};

/// `|p - 1|` below which the logarithmic integral is used.
pub const UNIT_EXPONENT_TOLERANCE: f64 = 1e-6;

/// Instantaneous aftershock rate at `t` days after the mainshock.
pub fn rate(k: f64, c: f64, p: f64, t: f64) -> f64 {
    k / (c + t).powf(p)
}

/// Expected number of aftershocks in `[t_start, t_end]` (days).
///
/// Exact analytic integral of [`rate`]:
///
/// ```text
/// p ≠ 1:  K / (1 - p) × [(c + t_end)^(1-p) - (c + t_start)^(1-p)]
/// p = 1:  K × ln((c + t_end) / (c + t_start))
/// ```
///
/// The `p ≠ 1` branch is evaluated as
/// `(c + t_start)^(1-p) × expm1((1-p) × ln(ratio)) / (1-p)`, which is the same
/// quantity without cancellation as `p` approaches 1.
pub fn expected_count(k: f64, c: f64, p: f64, t_start: f64, t_end: f64) -> AftershockResult<f64> {
    if k.is_nan() || k < 0.0 {
        return Err(AftershockError::invalid("k", k, "must be >= 0"));
    }
    if !(c.is_finite() && c > 0.0) {
        return Err(AftershockError::invalid("c", c, "must be finite and > 0"));
    }
    if !p.is_finite() {
        return Err(AftershockError::invalid("p", p, "must be finite"));
    }
    if !(t_start.is_finite() && t_start >= 0.0) {
        return Err(AftershockError::invalid(
            "t_start",
            t_start,
            "must be finite and >= 0",
        ));
    }
    if !(t_end.is_finite() && t_end > t_start) {
        return Err(AftershockError::invalid(
            "t_end",
            t_end,
            format!("must be finite and > t_start ({t_start})"),
        ));
    }
    if k == 0.0 {
        return Ok(0.0);
    }

    let log_ratio = ((c + t_end) / (c + t_start)).ln();
    let count = if (p - 1.0).abs() < UNIT_EXPONENT_TOLERANCE {
        k * log_ratio
    } else {
        let q = 1.0 - p;
        k * (c + t_start).powf(q) * (q * log_ratio).exp_m1() / q
    };

    Ok(count.max(0.0))
}
