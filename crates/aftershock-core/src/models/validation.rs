use serde::{Deserialize, Serialize};

use crate::event::EarthquakeEvent;

/// One historical mainshock scored in one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRecord {
    pub mainshock: EarthquakeEvent,
    pub window_days: f64,
    pub predicted_probability: f64,
    /// `predicted_probability >= decision_threshold`.
    pub predicted_occurred: bool,
    pub observed_occurred: bool,
    pub correct: bool,
}

impl ValidationRecord {
    pub fn new(
        mainshock: EarthquakeEvent,
        window_days: f64,
        predicted_probability: f64,
        decision_threshold: f64,
        observed_occurred: bool,
    ) -> Self {
        let predicted_occurred = predicted_probability >= decision_threshold;
        Self {
            mainshock,
            window_days,
            predicted_probability,
            predicted_occurred,
            observed_occurred,
            correct: predicted_occurred == observed_occurred,
        }
    }
}

/// Accuracy of all records sharing one window length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub window_days: f64,
    pub total: usize,
    pub correct: usize,
    /// `correct / total`, 0 when there are no records.
    pub accuracy: f64,
    /// Predicted and observed.
    pub hits: usize,
    /// Observed but not predicted.
    pub misses: usize,
    /// Predicted but not observed.
    pub false_alarms: usize,
    pub correct_negatives: usize,
    /// Mean squared error of the predicted probability against the 0/1 outcome.
    pub brier_score: f64,
}

impl ValidationSummary {
    /// Aggregate the records whose window equals `window_days`.
    pub fn from_records<'a>(
        window_days: f64,
        records: impl IntoIterator<Item = &'a ValidationRecord>,
    ) -> Self {
        let mut summary = Self {
            window_days,
            total: 0,
            correct: 0,
            accuracy: 0.0,
            hits: 0,
            misses: 0,
            false_alarms: 0,
            correct_negatives: 0,
            brier_score: 0.0,
        };
        let mut squared_error = 0.0;

        for record in records.into_iter().filter(|r| r.window_days == window_days) {
            summary.total += 1;
            match (record.predicted_occurred, record.observed_occurred) {
                (true, true) => summary.hits += 1,
                (false, true) => summary.misses += 1,
                (true, false) => summary.false_alarms += 1,
                (false, false) => summary.correct_negatives += 1,
            }
            if record.correct {
                summary.correct += 1;
            }
            let outcome = if record.observed_occurred { 1.0 } else { 0.0 };
            squared_error += (record.predicted_probability - outcome).powi(2);
        }

        if summary.total > 0 {
            summary.accuracy = summary.correct as f64 / summary.total as f64;
            summary.brier_score = squared_error / summary.total as f64;
        }
        summary
    }

    /// Accuracy in percent, rounded to one decimal.
    pub fn accuracy_percent(&self) -> f64 {
        (self.accuracy * 1000.0).round() / 10.0
    }
}

/// Full back-test output: every record plus per-window summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub decision_threshold: f64,
    pub records: Vec<ValidationRecord>,
    /// One entry per requested window, in request order.
    pub summaries: Vec<ValidationSummary>,
}

impl ValidationReport {
    pub fn summary_for(&self, window_days: f64) -> Option<&ValidationSummary> {
        self.summaries.iter().find(|s| s.window_days == window_days)
    }

    /// `(window_days, accuracy)` pairs in request order.
    pub fn accuracy_by_window(&self) -> Vec<(f64, f64)> {
        self.summaries
            .iter()
            .map(|s| (s.window_days, s.accuracy))
            .collect()
    }
}
