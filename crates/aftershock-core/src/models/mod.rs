pub mod forecast_result;
pub mod parameters;
pub mod validation;
pub mod window;

pub use forecast_result::{occurrence_probability, ForecastBreakdown, ForecastResult};
pub use parameters::ForecastParameters;
pub use validation::{ValidationRecord, ValidationReport, ValidationSummary};
pub use window::ForecastWindow;
