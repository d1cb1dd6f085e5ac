use crate::catalog::EventCatalog;
use crate::errors::AftershockResult;
use crate::event::EarthquakeEvent;
use crate::models::{ForecastParameters, ForecastResult};

/// Forecast query boundary.
///
/// Implementations must be pure: identical inputs give identical results,
/// and the catalog is only read.
pub trait IForecaster: Send + Sync {
    /// Probability of at least one aftershock at or above
    /// `params.magnitude_threshold` within `params.time_window_days` of
    /// `reference`.
    fn forecast(
        &self,
        reference: &EarthquakeEvent,
        catalog: &EventCatalog,
        params: &ForecastParameters,
    ) -> AftershockResult<ForecastResult>;
}
