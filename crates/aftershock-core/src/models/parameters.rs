use serde::{Deserialize, Serialize};

use crate::errors::{AftershockError, AftershockResult};

/// Per-query forecast parameters.
///
/// `k` is the Omori productivity at the calibration's reference magnitude;
/// the engine rescales it for the actual mainshock magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastParameters {
    /// Omori productivity constant (> 0).
    pub k: f64,
    /// Omori time offset in days (> 0).
    pub c: f64,
    /// Omori decay exponent, typically 0.8–1.5.
    pub p: f64,
    /// Gutenberg–Richter b-value (> 0).
    pub b: f64,
    /// Aftershocks are counted at or above this magnitude.
    pub magnitude_threshold: f64,
    /// Neighborhood radius around the mainshock epicenter (km, > 0).
    pub radius_km: f64,
    /// Forecast window length after the mainshock (days, > 0).
    pub time_window_days: f64,
    /// Overrides the reference event's magnitude for productivity scaling.
    #[serde(default)]
    pub reference_magnitude: Option<f64>,
    /// How far before the mainshock the neighborhood reaches. `None` = whole catalog.
    #[serde(default)]
    pub lookback_days: Option<f64>,
    /// Upper bound on the expected count λ. `None` = uncapped.
    #[serde(default)]
    pub max_expected_count: Option<f64>,
}

impl ForecastParameters {
    /// Report the first non-physical value.
    pub fn validate(&self) -> AftershockResult<()> {
        positive("k", self.k)?;
        positive("c", self.c)?;
        finite("p", self.p)?;
        positive("b", self.b)?;
        finite("magnitude_threshold", self.magnitude_threshold)?;
        positive("radius_km", self.radius_km)?;
        positive("time_window_days", self.time_window_days)?;
        if let Some(m) = self.reference_magnitude {
            finite("reference_magnitude", m)?;
        }
        if let Some(days) = self.lookback_days {
            non_negative("lookback_days", days)?;
        }
        if let Some(cap) = self.max_expected_count {
            non_negative("max_expected_count", cap)?;
        }
        Ok(())
    }

    pub fn with_time_window(mut self, days: f64) -> Self {
        self.time_window_days = days;
        self
    }

    pub fn with_magnitude_threshold(mut self, magnitude: f64) -> Self {
        self.magnitude_threshold = magnitude;
        self
    }
}

fn finite(name: &str, value: f64) -> AftershockResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AftershockError::invalid(name, value, "must be finite"))
    }
}

fn positive(name: &str, value: f64) -> AftershockResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AftershockError::invalid(name, value, "must be finite and > 0"))
    }
}

fn non_negative(name: &str, value: f64) -> AftershockResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AftershockError::invalid(name, value, "must be finite and >= 0"))
    }
}
