//! Read-only, time-ordered earthquake catalog.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AftershockError, AftershockResult};
use crate::event::EarthquakeEvent;

/// Ordered sequence of earthquakes, loaded once and never mutated.
///
/// Events are sorted by time (stable, so equal times keep their input order).
/// There are no mutating operations; forecasts only ever borrow a catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<EarthquakeEvent>",
    into = "Vec<EarthquakeEvent>"
)]
pub struct EventCatalog {
    events: Vec<EarthquakeEvent>,
}

impl EventCatalog {
    /// Build a catalog, rejecting the first invalid record.
    pub fn new(mut events: Vec<EarthquakeEvent>) -> AftershockResult<Self> {
        for event in &events {
            event.validate()?;
        }
        events.sort_by_key(|e| e.time);
        Ok(Self { events })
    }

    /// Build a catalog, dropping invalid records instead of failing.
    ///
    /// Returns the catalog and the number of records dropped.
    pub fn lossy(events: Vec<EarthquakeEvent>) -> (Self, usize) {
        let total = events.len();
        let mut kept: Vec<EarthquakeEvent> =
            events.into_iter().filter(|e| e.validate().is_ok()).collect();
        let dropped = total - kept.len();
        if dropped > 0 {
            tracing::debug!(dropped, kept = kept.len(), "dropped invalid catalog records");
        }
        kept.sort_by_key(|e| e.time);
        (Self { events: kept }, dropped)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[EarthquakeEvent] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EarthquakeEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// First and last event times, if any.
    pub fn time_span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.events.first(), self.events.last()) {
            (Some(first), Some(last)) => Some((first.time, last.time)),
            _ => None,
        }
    }

    /// Events with `start <= time < end`, found by binary search.
    pub fn events_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> &[EarthquakeEvent] {
        if end <= start {
            return &[];
        }
        let lo = self.events.partition_point(|e| e.time < start);
        let hi = self.events.partition_point(|e| e.time < end);
        &self.events[lo..hi]
    }

    /// The `n` largest events by magnitude, ties broken by earlier time.
    pub fn largest(&self, n: usize) -> Vec<&EarthquakeEvent> {
        let mut ranked: Vec<&EarthquakeEvent> = self.events.iter().collect();
        ranked.sort_by(|a, b| match b.magnitude.total_cmp(&a.magnitude) {
            Ordering::Equal => a.time.cmp(&b.time),
            other => other,
        });
        ranked.truncate(n);
        ranked
    }
}

impl TryFrom<Vec<EarthquakeEvent>> for EventCatalog {
    type Error = AftershockError;

    fn try_from(events: Vec<EarthquakeEvent>) -> Result<Self, Self::Error> {
        Self::new(events)
    }
}

impl From<EventCatalog> for Vec<EarthquakeEvent> {
    fn from(catalog: EventCatalog) -> Self {
        catalog.events
    }
}

impl<'a> IntoIterator for &'a EventCatalog {
    type Item = &'a EarthquakeEvent;
    type IntoIter = std::slice::Iter<'a, EarthquakeEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
