//! Conversions between fractional days and chrono instants.
//!
//! Forecast windows are expressed in days after the mainshock; catalogs carry
//! UTC instants. All conversions go through milliseconds.

use chrono::{DateTime, Duration, Utc};

use crate::errors::{AftershockError, AftershockResult};

pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Largest offset representable as a chrono duration in milliseconds.
const MAX_OFFSET_MILLIS: f64 = 9.0e18;

/// Convert a fractional number of days to a duration (millisecond precision).
pub fn days_to_duration(days: f64) -> AftershockResult<Duration> {
    if !days.is_finite() {
        return Err(AftershockError::invalid("days", days, "must be finite"));
    }
    let millis = (days * MILLIS_PER_DAY).round();
    if millis.abs() >= MAX_OFFSET_MILLIS {
        return Err(AftershockError::invalid(
            "days",
            days,
            "offset out of representable range",
        ));
    }
    Duration::try_milliseconds(millis as i64)
        .ok_or_else(|| AftershockError::invalid("days", days, "offset out of representable range"))
}

/// Fractional days elapsed from `from` to `to` (negative if `to` is earlier).
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_DAY
}

/// `origin + days`, failing instead of overflowing.
pub fn offset_by_days(origin: DateTime<Utc>, days: f64) -> AftershockResult<DateTime<Utc>> {
    let delta = days_to_duration(days)?;
    origin
        .checked_add_signed(delta)
        .ok_or_else(|| AftershockError::invalid("days", days, "instant out of range"))
}
