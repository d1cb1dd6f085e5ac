//! ValidationHarness: replays the largest catalog events as mainshocks and
//! scores each forecast against the recorded aftershocks.

use aftershock_core::config::{EstimationConfig, ParameterMode, ValidationConfig};
use aftershock_core::errors::{AftershockError, AftershockResult};
use aftershock_core::time::offset_by_days;
use aftershock_core::traits::IForecaster;
use aftershock_core::{
    CalibrationConfig, EarthquakeEvent, EventCatalog, ForecastParameters, ValidationRecord,
    ValidationReport, ValidationSummary,
};
use aftershock_forecast::SpatialTemporalFilter;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::regional_fit::RegionalFitter;

/// Back-test driver.
///
/// Output order is mainshock-major (largest first), then window in
/// configuration order, whether or not evaluation runs in parallel.
pub struct ValidationHarness<'f> {
    forecaster: &'f dyn IForecaster,
    config: ValidationConfig,
    estimation: EstimationConfig,
    calibration: CalibrationConfig,
}

impl<'f> ValidationHarness<'f> {
    pub fn new(forecaster: &'f dyn IForecaster, config: ValidationConfig) -> Self {
        Self {
            forecaster,
            config,
            estimation: EstimationConfig::default(),
            calibration: CalibrationConfig::default(),
        }
    }

    /// Estimator settings for `ParameterMode::RegionalFit`.
    pub fn with_estimation(mut self, estimation: EstimationConfig) -> Self {
        self.estimation = estimation;
        self
    }

    /// Calibration used by `ParameterMode::RegionalFit`. Should match the
    /// forecaster's.
    pub fn with_calibration(mut self, calibration: CalibrationConfig) -> Self {
        self.calibration = calibration;
        self
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Run the back-test. `base_params` supplies the radius and, in
    /// `ParameterMode::Fixed`, every Omori/GR parameter; window and
    /// threshold are overridden per record.
    pub fn run(
        &self,
        catalog: &EventCatalog,
        base_params: &ForecastParameters,
    ) -> AftershockResult<ValidationReport> {
        if catalog.is_empty() {
            return Err(AftershockError::EmptyCatalog);
        }
        self.validate_config()?;
        base_params.validate()?;

        let fitter = match self.config.parameter_mode {
            ParameterMode::Fixed => None,
            ParameterMode::RegionalFit => Some(RegionalFitter::new(
                self.estimation.clone(),
                &self.calibration,
            )?),
        };

        let mainshocks = catalog.largest(self.config.mainshock_count);
        debug!(
            mainshocks = mainshocks.len(),
            windows = self.config.time_windows_days.len(),
            parallel = self.config.parallel,
            "starting back-test"
        );

        let per_mainshock = if self.config.parallel {
            self.evaluate_parallel(&mainshocks, catalog, base_params, fitter.as_ref())?
        } else {
            self.evaluate_sequential(&mainshocks, catalog, base_params, fitter.as_ref())?
        };
        let records: Vec<ValidationRecord> = per_mainshock.into_iter().flatten().collect();

        let summaries: Vec<ValidationSummary> = self
            .config
            .time_windows_days
            .iter()
            .map(|&days| ValidationSummary::from_records(days, &records))
            .collect();
        for summary in &summaries {
            info!(
                window_days = summary.window_days,
                total = summary.total,
                correct = summary.correct,
                accuracy_percent = summary.accuracy_percent(),
                brier_score = summary.brier_score,
                "validation summary"
            );
        }

        Ok(ValidationReport {
            decision_threshold: self.config.decision_threshold,
            records,
            summaries,
        })
    }

    fn validate_config(&self) -> AftershockResult<()> {
        let config = &self.config;
        if config.mainshock_count == 0 {
            return Err(AftershockError::invalid(
                "mainshock_count",
                0.0,
                "at least one mainshock is required",
            ));
        }
        if config.time_windows_days.is_empty() {
            return Err(AftershockError::invalid(
                "time_windows_days",
                0.0,
                "at least one window is required",
            ));
        }
        if let Some(&days) = config
            .time_windows_days
            .iter()
            .find(|d| !(d.is_finite() && **d > 0.0))
        {
            return Err(AftershockError::invalid(
                "time_windows_days",
                days,
                "windows must be finite and > 0",
            ));
        }
        if let Some(days) = first_duplicate(&config.time_windows_days) {
            return Err(AftershockError::invalid(
                "time_windows_days",
                days,
                "windows must be distinct",
            ));
        }
        if !(0.0..=1.0).contains(&config.decision_threshold) {
            return Err(AftershockError::invalid(
                "decision_threshold",
                config.decision_threshold,
                "must lie in [0, 1]",
            ));
        }
        if !config.target_magnitude.is_finite() {
            return Err(AftershockError::invalid(
                "target_magnitude",
                config.target_magnitude,
                "must be finite",
            ));
        }
        Ok(())
    }

    fn evaluate_parallel(
        &self,
        mainshocks: &[&EarthquakeEvent],
        catalog: &EventCatalog,
        base_params: &ForecastParameters,
        fitter: Option<&RegionalFitter>,
    ) -> AftershockResult<Vec<Vec<ValidationRecord>>> {
        mainshocks
            .par_iter()
            .map(|mainshock| self.evaluate_mainshock(mainshock, catalog, base_params, fitter))
            .collect()
    }

    fn evaluate_sequential(
        &self,
        mainshocks: &[&EarthquakeEvent],
        catalog: &EventCatalog,
        base_params: &ForecastParameters,
        fitter: Option<&RegionalFitter>,
    ) -> AftershockResult<Vec<Vec<ValidationRecord>>> {
        mainshocks
            .iter()
            .map(|mainshock| self.evaluate_mainshock(mainshock, catalog, base_params, fitter))
            .collect()
    }

    /// One record per configured window.
    fn evaluate_mainshock(
        &self,
        mainshock: &EarthquakeEvent,
        catalog: &EventCatalog,
        base_params: &ForecastParameters,
        fitter: Option<&RegionalFitter>,
    ) -> AftershockResult<Vec<ValidationRecord>> {
        let params = match fitter {
            Some(fitter) => fitter.parameters(catalog, mainshock, base_params)?,
            None => base_params.clone(),
        };

        self.config
            .time_windows_days
            .iter()
            .map(|&days| {
                let query = params
                    .clone()
                    .with_time_window(days)
                    .with_magnitude_threshold(self.config.target_magnitude);
                let forecast = self.forecaster.forecast(mainshock, catalog, &query)?;
                let observed = self.observed(mainshock, catalog, query.radius_km, days)?;

                debug!(
                    magnitude = mainshock.magnitude,
                    window_days = days,
                    probability = forecast.probability,
                    observed,
                    "validation record"
                );
                Ok(ValidationRecord::new(
                    mainshock.clone(),
                    days,
                    forecast.probability,
                    self.config.decision_threshold,
                    observed,
                ))
            })
            .collect()
    }

    /// Whether the catalog holds an event at or above the target magnitude
    /// strictly after the mainshock, inside the radius and before
    /// `t0 + window_days`.
    fn observed(
        &self,
        mainshock: &EarthquakeEvent,
        catalog: &EventCatalog,
        radius_km: f64,
        window_days: f64,
    ) -> AftershockResult<bool> {
        let end = offset_by_days(mainshock.time, window_days)?;
        let filter = SpatialTemporalFilter::new(mainshock, radius_km, mainshock.time, end)?;
        let target = self.config.target_magnitude;
        Ok(filter
            .select(catalog)
            .any(|e| e.time > mainshock.time && e.magnitude >= target))
    }
}

/// First window that appears more than once.
fn first_duplicate(windows: &[f64]) -> Option<f64> {
    windows
        .iter()
        .enumerate()
        .find(|(i, w)| windows[i + 1..].contains(w))
        .map(|(_, &w)| w)
}
