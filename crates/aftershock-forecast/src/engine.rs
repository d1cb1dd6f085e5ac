//! ProbabilityEngine: composes productivity, Omori and Gutenberg–Richter
//! into an occurrence probability.

use aftershock_core::errors::{AftershockError, AftershockResult};
use aftershock_core::models::{occurrence_probability, ForecastBreakdown};
use aftershock_core::time::{days_between, offset_by_days};
use aftershock_core::traits::IForecaster;
use aftershock_core::{
    CalibrationConfig, EarthquakeEvent, EventCatalog, ForecastParameters, ForecastResult,
    ForecastWindow,
};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::filter::SpatialTemporalFilter;
use crate::productivity::ProductivityScaler;
use crate::{gutenberg_richter, omori};

/// Aftershock probability engine.
///
/// ```text
/// K = 10^(a + alpha (M - Mc))
/// N = ∫ K / (c + t)^p dt        over the window
/// F = 10^(-b (M_thr - M0))
/// λ = N × F
/// P = 1 - exp(-λ)
/// ```
///
/// Rate and magnitude are treated as independent. Probabilities of different
/// windows are not additive: combine windows with [`ForecastWindow::union`]
/// and [`forecast_window`](Self::forecast_window).
#[derive(Debug, Clone)]
pub struct ProbabilityEngine {
    calibration: CalibrationConfig,
}

impl ProbabilityEngine {
    pub fn new(calibration: CalibrationConfig) -> Self {
        Self { calibration }
    }

    pub fn calibration(&self) -> &CalibrationConfig {
        &self.calibration
    }

    /// Forecast over `[0, params.time_window_days]` after `reference`.
    pub fn forecast(
        &self,
        reference: &EarthquakeEvent,
        catalog: &EventCatalog,
        params: &ForecastParameters,
    ) -> AftershockResult<ForecastResult> {
        params.validate()?;
        let window = ForecastWindow::from_origin(reference.time, params.time_window_days)?;
        self.forecast_window(reference, catalog, params, &window)
    }

    /// Forecast over `[start_days, end_days]` after `reference`.
    /// `params.time_window_days` is ignored.
    pub fn forecast_interval(
        &self,
        reference: &EarthquakeEvent,
        catalog: &EventCatalog,
        params: &ForecastParameters,
        start_days: f64,
        end_days: f64,
    ) -> AftershockResult<ForecastResult> {
        let window = ForecastWindow::new(reference.time, start_days, end_days)?;
        self.forecast_window(reference, catalog, params, &window)
    }

    /// Forecast over an explicit window, e.g. the union of two windows.
    pub fn forecast_window(
        &self,
        reference: &EarthquakeEvent,
        catalog: &EventCatalog,
        params: &ForecastParameters,
        window: &ForecastWindow,
    ) -> AftershockResult<ForecastResult> {
        params.validate()?;
        if window.reference_time != reference.time {
            return Err(AftershockError::invalid(
                "window.reference_time",
                days_between(reference.time, window.reference_time),
                "window belongs to a different reference event",
            ));
        }

        // Calibration problems surface even when the neighborhood is empty.
        let scaler = ProductivityScaler::from_calibration(&self.calibration)?;
        let floor = self.calibration.completeness_magnitude()?;

        let neighborhood_size = self.neighborhood_size(reference, catalog, params, window.end)?;
        if neighborhood_size == 0 {
            debug!(
                magnitude = reference.magnitude,
                window_days = window.end_days,
                "empty neighborhood, zero expected aftershocks"
            );
            return Ok(ForecastResult::empty(window.clone(), params.magnitude_threshold));
        }

        let magnitude = params.reference_magnitude.unwrap_or(reference.magnitude);
        let productivity = scaler.productivity(params.k, magnitude)?;
        let total_count = omori::expected_count(
            productivity,
            params.c,
            params.p,
            window.start_days,
            window.end_days,
        )?;
        let exceedance_fraction =
            gutenberg_richter::exceedance_fraction(params.b, params.magnitude_threshold, floor)?;

        let mut expected_count = total_count * exceedance_fraction;
        // inf × 0 when productivity overflows and the tail underflows.
        if expected_count.is_nan() {
            expected_count = 0.0;
        }
        let mut capped = false;
        if let Some(cap) = params.max_expected_count {
            if expected_count > cap {
                expected_count = cap;
                capped = true;
            }
        }
        let probability = occurrence_probability(expected_count);

        debug!(
            magnitude,
            productivity,
            total_count,
            exceedance_fraction,
            expected_count,
            probability,
            neighborhood_size,
            window_days = window.end_days,
            "aftershock forecast"
        );

        Ok(ForecastResult {
            expected_count,
            probability,
            magnitude_threshold: params.magnitude_threshold,
            window: window.clone(),
            breakdown: ForecastBreakdown {
                productivity,
                total_count,
                exceedance_fraction,
                neighborhood_size,
                capped,
            },
        })
    }

    /// Window × magnitude-threshold table, windows outer, thresholds inner.
    pub fn forecast_grid(
        &self,
        reference: &EarthquakeEvent,
        catalog: &EventCatalog,
        params: &ForecastParameters,
        windows_days: &[f64],
        magnitude_thresholds: &[f64],
    ) -> AftershockResult<Vec<ForecastResult>> {
        let mut results = Vec::with_capacity(windows_days.len() * magnitude_thresholds.len());
        for &days in windows_days {
            for &threshold in magnitude_thresholds {
                let cell = params
                    .clone()
                    .with_time_window(days)
                    .with_magnitude_threshold(threshold);
                results.push(self.forecast(reference, catalog, &cell)?);
            }
        }
        Ok(results)
    }

    /// Catalog events near `reference` up to `window_end`, excluding the
    /// reference itself.
    fn neighborhood_size(
        &self,
        reference: &EarthquakeEvent,
        catalog: &EventCatalog,
        params: &ForecastParameters,
        window_end: DateTime<Utc>,
    ) -> AftershockResult<usize> {
        let start = match params.lookback_days {
            Some(days) => offset_by_days(reference.time, -days)?,
            None => DateTime::<Utc>::MIN_UTC,
        };
        let filter = SpatialTemporalFilter::new(reference, params.radius_km, start, window_end)?;
        Ok(filter.select(catalog).filter(|e| *e != reference).count())
    }
}

impl IForecaster for ProbabilityEngine {
    fn forecast(
        &self,
        reference: &EarthquakeEvent,
        catalog: &EventCatalog,
        params: &ForecastParameters,
    ) -> AftershockResult<ForecastResult> {
        ProbabilityEngine::forecast(self, reference, catalog, params)
    }
}
