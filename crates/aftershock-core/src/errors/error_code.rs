//! AftershockErrorCode trait for presenting errors across the library boundary.

/// Structured error code for collaborators (UI, exporters) that present
/// errors to an end user. Every error enum implements this.
pub trait AftershockErrorCode {
    /// Returns the error code string (e.g., "INVALID_PARAMETER").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVALID_PARAMETER: &str = "INVALID_PARAMETER";
pub const CONFIGURATION_ERROR: &str = "CONFIGURATION_ERROR";
pub const EMPTY_CATALOG: &str = "EMPTY_CATALOG";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
