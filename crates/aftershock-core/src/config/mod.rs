//! Configuration: compiled defaults, TOML sections, and environment overrides.

pub mod aftershock_config;
pub mod calibration_config;
pub mod defaults;
pub mod estimation_config;
pub mod forecast_config;
pub mod observability_config;
pub mod validation_config;

pub use aftershock_config::AftershockConfig;
pub use calibration_config::CalibrationConfig;
pub use estimation_config::{BValueEstimation, EstimationConfig, OmoriFitConfig};
pub use forecast_config::ForecastConfig;
pub use observability_config::ObservabilityConfig;
pub use validation_config::{ParameterMode, ValidationConfig};
