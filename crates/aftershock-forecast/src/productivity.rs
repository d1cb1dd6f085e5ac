use aftershock_core::errors::{AftershockError, AftershockResult};
use aftershock_core::CalibrationConfig;

/// Magnitude-dependent Omori productivity:
///
/// ```text
/// K = 10^(a + alpha × (M - Mc))
/// ```
///
/// Larger mainshocks produce proportionally more aftershocks. Any finite
/// magnitude is accepted; results are only physically meaningful for M ≈ 3–9.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductivityScaler {
    /// Fixed intercept; when `None` the caller's base productivity supplies it.
    a: Option<f64>,
    alpha: f64,
    reference_magnitude: f64,
}

impl ProductivityScaler {
    /// Fails with a configuration error when `alpha` or `Mc` is unset.
    pub fn from_calibration(calibration: &CalibrationConfig) -> AftershockResult<Self> {
        let alpha = calibration.alpha()?;
        let reference_magnitude = calibration.productivity_reference_magnitude()?;
        Self::new(calibration.productivity_a, alpha, reference_magnitude)
    }

    pub fn new(a: Option<f64>, alpha: f64, reference_magnitude: f64) -> AftershockResult<Self> {
        if let Some(a) = a {
            finite("productivity_a", a)?;
        }
        finite("alpha", alpha)?;
        finite("productivity_reference_magnitude", reference_magnitude)?;
        Ok(Self {
            a,
            alpha,
            reference_magnitude,
        })
    }

    /// Productivity for a mainshock of `magnitude`.
    ///
    /// `base_k` is the productivity at `Mc`; it only matters when the
    /// calibration leaves `a` unset (`a = log10(base_k)`).
    pub fn productivity(&self, base_k: f64, magnitude: f64) -> AftershockResult<f64> {
        finite("magnitude", magnitude)?;
        let a = match self.a {
            Some(a) => a,
            None => {
                if !(base_k.is_finite() && base_k > 0.0) {
                    return Err(AftershockError::invalid(
                        "k",
                        base_k,
                        "must be finite and > 0",
                    ));
                }
                base_k.log10()
            }
        };
        Ok(10f64.powf(a + self.alpha * (magnitude - self.reference_magnitude)))
    }
}

fn finite(name: &str, value: f64) -> AftershockResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AftershockError::invalid(name, value, "must be finite"))
    }
}
