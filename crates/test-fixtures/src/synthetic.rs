//! Deterministic synthetic catalogs.
//!
//! Aftershock times follow the modified Omori law (inverse-CDF sampling),
//! magnitudes follow Gutenberg–Richter above a floor, and epicenters are
//! spread uniformly over a disc around the mainshock.

use aftershock_core::{EarthquakeEvent, EventCatalog};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Fixed origin for synthetic catalogs.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap()
}

/// `base_time() + days` at second precision.
pub fn at_day(days: f64) -> DateTime<Utc> {
    base_time() + Duration::milliseconds((days * 86_400_000.0).round() as i64)
}

/// A valid event at 10 km depth.
pub fn event(time: DateTime<Utc>, latitude: f64, longitude: f64, magnitude: f64) -> EarthquakeEvent {
    EarthquakeEvent::new(time, latitude, longitude, 10.0, magnitude).unwrap()
}

/// Epicenter `distance_km` away from `(latitude, longitude)` along `bearing_deg`.
pub fn destination(latitude: f64, longitude: f64, distance_km: f64, bearing_deg: f64) -> (f64, f64) {
    let phi1 = latitude.to_radians();
    let lambda1 = longitude.to_radians();
    let theta = bearing_deg.to_radians();
    let delta = distance_km / EARTH_RADIUS_KM;

    let phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos()).asin();
    let lambda2 = lambda1
        + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * phi2.sin());
    let lon = (lambda2.to_degrees() + 540.0) % 360.0 - 180.0;
    (phi2.to_degrees(), lon)
}

/// Parameters of one synthetic mainshock-aftershock sequence.
#[derive(Debug, Clone)]
pub struct SequenceSpec {
    pub mainshock_time: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub mainshock_magnitude: f64,
    pub aftershock_count: usize,
    pub c: f64,
    pub p: f64,
    /// Aftershock times are drawn from `[0, duration_days]`.
    pub duration_days: f64,
    pub b: f64,
    /// Smallest aftershock magnitude.
    pub floor_magnitude: f64,
    /// Aftershocks stay strictly below the mainshock magnitude.
    pub spread_km: f64,
}

impl SequenceSpec {
    pub fn at(mainshock_time: DateTime<Utc>, latitude: f64, longitude: f64, magnitude: f64) -> Self {
        Self {
            mainshock_time,
            latitude,
            longitude,
            mainshock_magnitude: magnitude,
            aftershock_count: 60,
            c: 0.1,
            p: 1.1,
            duration_days: 60.0,
            b: 1.0,
            floor_magnitude: 4.5,
            spread_km: 50.0,
        }
    }

    pub fn with_aftershocks(mut self, count: usize) -> Self {
        self.aftershock_count = count;
        self
    }
}

/// Mainshock followed by its aftershocks (unsorted).
pub fn generate_sequence(spec: &SequenceSpec, rng: &mut StdRng) -> Vec<EarthquakeEvent> {
    let mut events = Vec::with_capacity(spec.aftershock_count + 1);
    events.push(event(
        spec.mainshock_time,
        spec.latitude,
        spec.longitude,
        spec.mainshock_magnitude,
    ));

    for _ in 0..spec.aftershock_count {
        let offset = sample_omori_offset(spec.c, spec.p, spec.duration_days, rng.gen());
        let magnitude = sample_magnitude(spec.b, spec.floor_magnitude, rng.gen())
            .min(spec.mainshock_magnitude - 0.1);
        let distance = spec.spread_km * rng.gen::<f64>().sqrt();
        let bearing = rng.gen::<f64>() * 360.0;
        let (lat, lon) = destination(spec.latitude, spec.longitude, distance, bearing);
        // Keep aftershocks strictly after the mainshock at millisecond precision.
        let delay = Duration::milliseconds(((offset * 86_400_000.0).round() as i64).max(1));
        events.push(event(spec.mainshock_time + delay, lat, lon, magnitude));
    }
    events
}

/// Inverse-CDF sample of an Omori-distributed offset in `[0, duration]` days.
pub fn sample_omori_offset(c: f64, p: f64, duration: f64, u: f64) -> f64 {
    if (p - 1.0).abs() < 1e-9 {
        return c * ((c + duration) / c).powf(u) - c;
    }
    let q = 1.0 - p;
    let lo = c.powf(q);
    let hi = (c + duration).powf(q);
    (lo + u * (hi - lo)).powf(1.0 / q) - c
}

/// Gutenberg–Richter magnitude above `floor` for a uniform draw `u` in `[0, 1)`.
pub fn sample_magnitude(b: f64, floor: f64, u: f64) -> f64 {
    floor - (1.0 - u).log10() / b
}

/// Several well-separated sequences plus sparse background seismicity.
///
/// Sequences sit 10° of longitude apart in bands of 36, and bands 15° of
/// latitude apart, so their 250 km neighborhoods never overlap. The same
/// seed always produces the same catalog.
pub fn synthetic_catalog(seed: u64, sequences: usize) -> EventCatalog {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut events = Vec::new();

    for i in 0..sequences {
        let magnitude = 6.0 + (i % 8) as f64 * 0.2;
        let (latitude, longitude) = sequence_epicenter(i);
        let spec = SequenceSpec::at(at_day(200.0 * i as f64 + 100.0), latitude, longitude, magnitude)
        .with_aftershocks(20 + 10 * (i % 5));
        events.extend(generate_sequence(&spec, &mut rng));
    }

    for _ in 0..(sequences * 10) {
        let day = rng.gen::<f64>() * 200.0 * sequences.max(1) as f64;
        let lat = -60.0 + rng.gen::<f64>() * 20.0;
        let lon = -180.0 + rng.gen::<f64>() * 360.0;
        let magnitude = sample_magnitude(1.0, 4.5, rng.gen()).min(5.9);
        events.push(event(at_day(day), lat, lon, magnitude));
    }

    EventCatalog::new(events).unwrap()
}

/// Grid slot of the `index`-th sequence. Bands run 30°N to 30°S, clear of the
/// background seismicity at 40°S to 60°S.
fn sequence_epicenter(index: usize) -> (f64, f64) {
    const PER_BAND: usize = 36;
    const BANDS: usize = 5;
    let band = (index / PER_BAND) % BANDS;
    let slot = index % PER_BAND;
    (30.0 - 15.0 * band as f64, -175.0 + 10.0 * slot as f64)
}
