//! # aftershock-core
//!
//! Foundation crate for aftershock probability forecasting.
//! Defines the earthquake data model, forecast/validation value types,
//! errors, configuration, and the forecaster trait.
//! Every other crate in the workspace depends on this.

pub mod catalog;
pub mod config;
pub mod errors;
pub mod event;
pub mod models;
pub mod time;
pub mod tracing_setup;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use catalog::EventCatalog;
pub use config::{AftershockConfig, CalibrationConfig};
pub use errors::{AftershockError, AftershockResult};
pub use event::EarthquakeEvent;
pub use models::{
    ForecastBreakdown, ForecastParameters, ForecastResult, ForecastWindow, ValidationRecord,
    ValidationReport, ValidationSummary,
};
pub use traits::IForecaster;
