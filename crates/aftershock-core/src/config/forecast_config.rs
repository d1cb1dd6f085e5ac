use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{AftershockError, AftershockResult};
use crate::models::ForecastParameters;

/// `[forecast]` section: Omori/Gutenberg–Richter constants and the query grid.
///
/// The physical constants have no compiled defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub k: Option<f64>,
    pub c: Option<f64>,
    pub p: Option<f64>,
    pub b: Option<f64>,
    pub radius_km: f64,
    /// Forecast windows in days. The first is the default query window.
    pub time_windows_days: Vec<f64>,
    /// Magnitude thresholds. The first is the default query threshold.
    pub magnitude_thresholds: Vec<f64>,
    pub lookback_days: Option<f64>,
    pub max_expected_count: Option<f64>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            k: None,
            c: None,
            p: None,
            b: None,
            radius_km: defaults::DEFAULT_RADIUS_KM,
            time_windows_days: defaults::DEFAULT_TIME_WINDOWS_DAYS.to_vec(),
            magnitude_thresholds: defaults::DEFAULT_MAGNITUDE_THRESHOLDS.to_vec(),
            lookback_days: None,
            max_expected_count: None,
        }
    }
}

impl ForecastConfig {
    /// Build validated query parameters for the first window and threshold.
    pub fn to_parameters(&self) -> AftershockResult<ForecastParameters> {
        let params = ForecastParameters {
            k: required("forecast.k", self.k)?,
            c: required("forecast.c", self.c)?,
            p: required("forecast.p", self.p)?,
            b: required("forecast.b", self.b)?,
            magnitude_threshold: required(
                "forecast.magnitude_thresholds",
                self.magnitude_thresholds.first().copied(),
            )?,
            radius_km: self.radius_km,
            time_window_days: required(
                "forecast.time_windows_days",
                self.time_windows_days.first().copied(),
            )?,
            reference_magnitude: None,
            lookback_days: self.lookback_days,
            max_expected_count: self.max_expected_count,
        };
        params.validate()?;
        Ok(params)
    }
}

fn required(field: &str, value: Option<f64>) -> AftershockResult<f64> {
    value.ok_or_else(|| AftershockError::missing(field))
}
