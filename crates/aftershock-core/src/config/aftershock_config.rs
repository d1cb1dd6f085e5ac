//! Top-level configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    CalibrationConfig, EstimationConfig, ForecastConfig, ObservabilityConfig, ValidationConfig,
};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sections.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`AFTERSHOCK_*`)
/// 2. Config file
/// 3. Compiled defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AftershockConfig {
    pub forecast: ForecastConfig,
    pub calibration: CalibrationConfig,
    pub estimation: EstimationConfig,
    pub validation: ValidationConfig,
    pub observability: ObservabilityConfig,
}

impl AftershockConfig {
    /// Load from a TOML file, apply environment overrides, and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let mut config: AftershockConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string. No environment overrides.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: AftershockConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
                path: "<string>".to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let forecast = &self.forecast;
        if !(forecast.radius_km.is_finite() && forecast.radius_km > 0.0) {
            return Err(failed("forecast.radius_km", "must be greater than 0"));
        }
        check_windows("forecast.time_windows_days", &forecast.time_windows_days)?;
        if forecast.magnitude_thresholds.iter().any(|m| !m.is_finite()) {
            return Err(failed("forecast.magnitude_thresholds", "must be finite"));
        }

        let fit = &self.estimation.omori_fit;
        for (field, bounds) in [
            ("estimation.omori_fit.k_bounds", fit.k_bounds),
            ("estimation.omori_fit.c_bounds", fit.c_bounds),
            ("estimation.omori_fit.p_bounds", fit.p_bounds),
        ] {
            if !(bounds[0].is_finite() && bounds[1].is_finite() && bounds[0] <= bounds[1]) {
                return Err(failed(field, "lower bound must not exceed upper bound"));
            }
        }
        if fit.c_bounds[0] <= 0.0 {
            return Err(failed("estimation.omori_fit.c_bounds", "c must stay > 0"));
        }
        if fit.histogram_days == 0 {
            return Err(failed("estimation.omori_fit.histogram_days", "must be greater than 0"));
        }
        if !(fit.fallback_c > 0.0 && fit.fallback_k > 0.0) {
            return Err(failed("estimation.omori_fit.fallback_*", "K and c must be > 0"));
        }
        if !(self.estimation.b_value.fallback > 0.0) {
            return Err(failed("estimation.b_value.fallback", "must be greater than 0"));
        }

        let validation = &self.validation;
        if validation.mainshock_count == 0 {
            return Err(failed("validation.mainshock_count", "must be greater than 0"));
        }
        check_windows("validation.time_windows_days", &validation.time_windows_days)?;
        if !(0.0..=1.0).contains(&validation.decision_threshold) {
            return Err(failed(
                "validation.decision_threshold",
                "must be between 0.0 and 1.0",
            ));
        }
        if !validation.target_magnitude.is_finite() {
            return Err(failed("validation.target_magnitude", "must be finite"));
        }
        Ok(())
    }

    /// Apply `AFTERSHOCK_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup (environment, test maps).
    /// Unparseable values are ignored.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let number = |key: &str| lookup(key).and_then(|v| v.trim().parse::<f64>().ok());

        if let Some(v) = number("AFTERSHOCK_RADIUS_KM") {
            self.forecast.radius_km = v;
        }
        if let Some(v) = number("AFTERSHOCK_B_VALUE") {
            self.forecast.b = Some(v);
        }
        if let Some(v) = number("AFTERSHOCK_ALPHA") {
            self.calibration.alpha = Some(v);
        }
        if let Some(v) = number("AFTERSHOCK_COMPLETENESS_MAGNITUDE") {
            self.calibration.completeness_magnitude = Some(v);
        }
        if let Some(v) = number("AFTERSHOCK_TARGET_MAGNITUDE") {
            self.validation.target_magnitude = v;
        }
        if let Some(v) = number("AFTERSHOCK_DECISION_THRESHOLD") {
            self.validation.decision_threshold = v;
        }
        if let Some(v) = lookup("AFTERSHOCK_MAINSHOCK_COUNT").and_then(|v| v.trim().parse().ok()) {
            self.validation.mainshock_count = v;
        }
        if let Some(v) = lookup("AFTERSHOCK_PARALLEL").and_then(|v| v.trim().parse().ok()) {
            self.validation.parallel = v;
        }
    }
}

fn failed(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn check_windows(field: &str, windows: &[f64]) -> Result<(), ConfigError> {
    if windows.is_empty() {
        return Err(failed(field, "must list at least one window"));
    }
    if windows.iter().any(|w| !(w.is_finite() && *w > 0.0)) {
        return Err(failed(field, "windows must be finite and greater than 0"));
    }
    if windows
        .iter()
        .enumerate()
        .any(|(i, w)| windows[i + 1..].contains(w))
    {
        return Err(failed(field, "windows must be distinct"));
    }
    Ok(())
}
