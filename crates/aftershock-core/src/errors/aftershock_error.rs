use super::config_error::ConfigError;
use super::error_code::{self, AftershockErrorCode};

/// Errors surfaced by forecasting and validation.
///
/// A forecast over an empty neighborhood is not an error: it yields
/// `expected_count = 0` and `probability = 0`.
#[derive(Debug, thiserror::Error)]
pub enum AftershockError {
    /// Non-physical input (negative radius, `c <= 0`, `b <= 0`, empty interval, ...).
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: String,
        value: f64,
        reason: String,
    },

    /// A required calibration constant is missing.
    #[error("configuration error for {field}: {reason}")]
    Configuration { field: String, reason: String },

    /// Validation was requested on a catalog with no events.
    #[error("validation requested on an empty catalog")]
    EmptyCatalog,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AftershockError {
    pub fn invalid(name: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value,
            reason: reason.into(),
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::Configuration {
            field: field.into(),
            reason: "required value is not set".to_string(),
        }
    }
}

impl AftershockErrorCode for AftershockError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidParameter { .. } => error_code::INVALID_PARAMETER,
            Self::Configuration { .. } => error_code::CONFIGURATION_ERROR,
            Self::EmptyCatalog => error_code::EMPTY_CATALOG,
            Self::Config(e) => e.error_code(),
        }
    }
}

/// Convenience alias used across the workspace.
pub type AftershockResult<T> = Result<T, AftershockError>;
