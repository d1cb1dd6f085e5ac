//! Spatial-temporal event selection around a reference event.

use aftershock_core::errors::{AftershockError, AftershockResult};
use aftershock_core::{EarthquakeEvent, EventCatalog};
use chrono::{DateTime, Utc};

/// Mean Earth radius used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two epicenters (haversine), in km.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    // Rounding can push `a` past 1 near antipodes.
    let a = ((d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Selects events within `radius_km` (closed) of a reference epicenter and
/// with time in `[start, end)`.
///
/// Depth is ignored: the distance test is 2-D epicentral.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialTemporalFilter {
    latitude: f64,
    longitude: f64,
    radius_km: f64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl SpatialTemporalFilter {
    pub fn new(
        reference: &EarthquakeEvent,
        radius_km: f64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AftershockResult<Self> {
        if !(radius_km.is_finite() && radius_km > 0.0) {
            return Err(AftershockError::invalid(
                "radius_km",
                radius_km,
                "must be finite and > 0",
            ));
        }
        if end < start {
            return Err(AftershockError::invalid(
                "window_end",
                aftershock_core::time::days_between(start, end),
                "window end precedes window start",
            ));
        }
        Ok(Self {
            latitude: reference.latitude,
            longitude: reference.longitude,
            radius_km,
            start,
            end,
        })
    }

    /// A purely spatial filter over the whole time axis.
    pub fn regional(reference: &EarthquakeEvent, radius_km: f64) -> AftershockResult<Self> {
        Self::new(
            reference,
            radius_km,
            DateTime::<Utc>::MIN_UTC,
            DateTime::<Utc>::MAX_UTC,
        )
    }

    pub fn distance_km(&self, event: &EarthquakeEvent) -> f64 {
        haversine_km(self.latitude, self.longitude, event.latitude, event.longitude)
    }

    pub fn contains(&self, event: &EarthquakeEvent) -> bool {
        event.time >= self.start && event.time < self.end && self.distance_km(event) <= self.radius_km
    }

    /// Lazily yield the matching catalog events in time order.
    pub fn select<'a>(
        &self,
        catalog: &'a EventCatalog,
    ) -> impl Iterator<Item = &'a EarthquakeEvent> + 'a {
        let filter = self.clone();
        catalog
            .events_between(self.start, self.end)
            .iter()
            .filter(move |e| filter.distance_km(e) <= filter.radius_km)
    }
}

/// One-shot selection: events of `catalog` within `radius_km` of `reference`
/// and in `[start, end)`.
pub fn select<'a>(
    catalog: &'a EventCatalog,
    reference: &EarthquakeEvent,
    radius_km: f64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> AftershockResult<impl Iterator<Item = &'a EarthquakeEvent> + 'a> {
    let filter = SpatialTemporalFilter::new(reference, radius_km, start, end)?;
    Ok(filter.select(catalog))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = haversine_km(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let a = haversine_km(35.69, 51.39, 29.0, 58.3);
        let b = haversine_km(29.0, 58.3, 35.69, 51.39);
        assert!((a - b).abs() < 1e-9);
        assert_eq!(haversine_km(35.69, 51.39, 35.69, 51.39), 0.0);
    }

    #[test]
    fn antipodes_are_half_circumference() {
        let d = haversine_km(0.0, 0.0, 0.0, 180.0);
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn off_equator_antipodes_stay_finite() {
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        for i in 0..=180 {
            let lat = -90.0 + i as f64;
            let d = haversine_km(lat, 10.0, -lat, -170.0);
            assert!(d.is_finite(), "NaN at latitude {lat}");
            assert!((d - half).abs() < 1e-3, "latitude {lat}: {d}");
        }
    }
}
