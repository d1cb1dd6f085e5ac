use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AftershockError, AftershockResult};
use crate::time::{days_between, offset_by_days};

/// A forecast window `[start_days, end_days]` after a reference event.
///
/// Probabilities of different windows must not be summed. To forecast a
/// combined window, take the [`union`](Self::union) and re-run the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastWindow {
    /// Origin time of the reference event.
    pub reference_time: DateTime<Utc>,
    pub start_days: f64,
    pub end_days: f64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ForecastWindow {
    pub fn new(
        reference_time: DateTime<Utc>,
        start_days: f64,
        end_days: f64,
    ) -> AftershockResult<Self> {
        if !(start_days.is_finite() && start_days >= 0.0) {
            return Err(AftershockError::invalid(
                "start_days",
                start_days,
                "must be finite and >= 0",
            ));
        }
        if !(end_days.is_finite() && end_days > start_days) {
            return Err(AftershockError::invalid(
                "end_days",
                end_days,
                format!("must be finite and > start_days ({start_days})"),
            ));
        }
        Ok(Self {
            reference_time,
            start_days,
            end_days,
            start: offset_by_days(reference_time, start_days)?,
            end: offset_by_days(reference_time, end_days)?,
        })
    }

    /// The window `[0, days]` right after the reference event.
    pub fn from_origin(reference_time: DateTime<Utc>, days: f64) -> AftershockResult<Self> {
        Self::new(reference_time, 0.0, days)
    }

    pub fn duration_days(&self) -> f64 {
        self.end_days - self.start_days
    }

    /// Whether the two windows share a reference and overlap or touch.
    pub fn is_contiguous_with(&self, other: &ForecastWindow) -> bool {
        self.reference_time == other.reference_time
            && self.start_days <= other.end_days
            && other.start_days <= self.end_days
    }

    /// Smallest window covering both, if they are contiguous.
    pub fn union(&self, other: &ForecastWindow) -> AftershockResult<ForecastWindow> {
        if self.reference_time != other.reference_time {
            return Err(AftershockError::invalid(
                "reference_time",
                days_between(self.reference_time, other.reference_time),
                "windows belong to different reference events",
            ));
        }
        if !self.is_contiguous_with(other) {
            let gap = (other.start_days - self.end_days).max(self.start_days - other.end_days);
            return Err(AftershockError::invalid(
                "window_gap_days",
                gap,
                "windows are disjoint; forecast each gap explicitly",
            ));
        }
        ForecastWindow::new(
            self.reference_time,
            self.start_days.min(other.start_days),
            self.end_days.max(other.end_days),
        )
    }
}
