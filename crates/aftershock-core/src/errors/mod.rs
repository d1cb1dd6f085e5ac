//! Error handling for aftershock forecasting.
//! One error enum per concern, `thiserror` only.

pub mod aftershock_error;
pub mod config_error;
pub mod error_code;

pub use aftershock_error::{AftershockError, AftershockResult};
pub use config_error::ConfigError;
pub use error_code::AftershockErrorCode;
