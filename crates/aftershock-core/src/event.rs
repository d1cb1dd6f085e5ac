use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AftershockError, AftershockResult};

/// A single catalog earthquake.
///
/// Field aliases accept the column names produced by the catalog downloader
/// (`mag`, `lat`, `lon`, `depth`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeEvent {
    /// Origin time (UTC).
    pub time: DateTime<Utc>,
    /// Epicenter latitude in degrees.
    #[serde(alias = "lat")]
    pub latitude: f64,
    /// Epicenter longitude in degrees.
    #[serde(alias = "lon")]
    pub longitude: f64,
    /// Hypocentral depth in km. Not used by the epicentral distance test.
    #[serde(alias = "depth", default)]
    pub depth_km: f64,
    #[serde(alias = "mag")]
    pub magnitude: f64,
}

impl EarthquakeEvent {
    /// Create a validated event.
    pub fn new(
        time: DateTime<Utc>,
        latitude: f64,
        longitude: f64,
        depth_km: f64,
        magnitude: f64,
    ) -> AftershockResult<Self> {
        let event = Self {
            time,
            latitude,
            longitude,
            depth_km,
            magnitude,
        };
        event.validate()?;
        Ok(event)
    }

    /// Check the physical invariants of the record.
    pub fn validate(&self) -> AftershockResult<()> {
        if !self.magnitude.is_finite() {
            return Err(AftershockError::invalid(
                "magnitude",
                self.magnitude,
                "must be finite",
            ));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(AftershockError::invalid(
                "latitude",
                self.latitude,
                "must be within [-90, 90]",
            ));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(AftershockError::invalid(
                "longitude",
                self.longitude,
                "must be within [-180, 180]",
            ));
        }
        if !(self.depth_km.is_finite() && self.depth_km >= 0.0) {
            return Err(AftershockError::invalid(
                "depth_km",
                self.depth_km,
                "must be finite and non-negative",
            ));
        }
        Ok(())
    }
}
