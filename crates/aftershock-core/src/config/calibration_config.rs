use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{AftershockError, AftershockResult};

/// Calibration constants for productivity scaling and the magnitude floor.
///
/// Unset values stay `None` and surface as a configuration error when a
/// forecast needs them; they are never silently defaulted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Productivity intercept `a`. When unset, `log10(k)` of the forecast
    /// parameters is used.
    pub productivity_a: Option<f64>,
    /// Productivity magnitude scaling `alpha`.
    pub alpha: Option<f64>,
    /// Magnitude `Mc` at which the productivity equals `10^a`.
    pub productivity_reference_magnitude: Option<f64>,
    /// Catalog completeness magnitude `M0`, the Gutenberg–Richter floor.
    pub completeness_magnitude: Option<f64>,
}

impl CalibrationConfig {
    /// Regional calibration: alpha 0.9, Mc 6.0, M0 4.5.
    pub fn regional() -> Self {
        Self {
            productivity_a: None,
            alpha: Some(defaults::REGIONAL_ALPHA),
            productivity_reference_magnitude: Some(
                defaults::REGIONAL_PRODUCTIVITY_REFERENCE_MAGNITUDE,
            ),
            completeness_magnitude: Some(defaults::REGIONAL_COMPLETENESS_MAGNITUDE),
        }
    }

    pub fn alpha(&self) -> AftershockResult<f64> {
        required("calibration.alpha", self.alpha)
    }

    pub fn productivity_reference_magnitude(&self) -> AftershockResult<f64> {
        required(
            "calibration.productivity_reference_magnitude",
            self.productivity_reference_magnitude,
        )
    }

    pub fn completeness_magnitude(&self) -> AftershockResult<f64> {
        required(
            "calibration.completeness_magnitude",
            self.completeness_magnitude,
        )
    }
}

fn required(field: &str, value: Option<f64>) -> AftershockResult<f64> {
    value.ok_or_else(|| AftershockError::missing(field))
}
