//! Per-mainshock parameter estimation for `ParameterMode::RegionalFit`.

use aftershock_core::config::EstimationConfig;
use aftershock_core::errors::{AftershockError, AftershockResult};
use aftershock_core::{CalibrationConfig, EarthquakeEvent, EventCatalog, ForecastParameters};
use aftershock_forecast::estimation::{aki_b_value, BValueEstimate, OmoriFit, OmoriFitter};
use aftershock_forecast::SpatialTemporalFilter;
use tracing::debug;

/// Estimates fitted for one mainshock's region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionalEstimate {
    pub b_value: BValueEstimate,
    pub omori: OmoriFit,
}

/// Derives forecast parameters from the events around a mainshock.
///
/// The b-value comes from every regional event at or above the completeness
/// magnitude; the Omori triple is fitted to the daily histogram of the events
/// following the mainshock. The fitted K becomes the base productivity and
/// is rescaled for the mainshock magnitude by the engine like any other `k`.
#[derive(Debug, Clone)]
pub struct RegionalFitter {
    estimation: EstimationConfig,
    completeness_magnitude: f64,
}

impl RegionalFitter {
    /// Needs `M0` from the calibration, and `productivity_a` unset so the
    /// fitted K reaches the engine.
    pub fn new(
        estimation: EstimationConfig,
        calibration: &CalibrationConfig,
    ) -> AftershockResult<Self> {
        if calibration.productivity_a.is_some() {
            return Err(AftershockError::Configuration {
                field: "calibration.productivity_a".to_string(),
                reason: "must be unset when Omori productivity is fitted per mainshock"
                    .to_string(),
            });
        }
        Ok(Self {
            estimation,
            completeness_magnitude: calibration.completeness_magnitude()?,
        })
    }

    pub fn estimate(
        &self,
        catalog: &EventCatalog,
        mainshock: &EarthquakeEvent,
        radius_km: f64,
    ) -> AftershockResult<RegionalEstimate> {
        let region = SpatialTemporalFilter::regional(mainshock, radius_km)?;

        let b_value = aki_b_value(
            region.select(catalog).map(|e| e.magnitude),
            self.completeness_magnitude,
            &self.estimation.b_value,
        );
        let omori = OmoriFitter::new(self.estimation.omori_fit.clone())
            .fit_sequence(mainshock, region.select(catalog));

        debug!(
            magnitude = mainshock.magnitude,
            b = b_value.b,
            b_source = ?b_value.source,
            k = omori.k,
            c = omori.c,
            p = omori.p,
            omori_source = ?omori.source,
            "regional parameters"
        );
        Ok(RegionalEstimate { b_value, omori })
    }

    /// `base` with the regional b-value and Omori triple substituted.
    pub fn parameters(
        &self,
        catalog: &EventCatalog,
        mainshock: &EarthquakeEvent,
        base: &ForecastParameters,
    ) -> AftershockResult<ForecastParameters> {
        let estimate = self.estimate(catalog, mainshock, base.radius_km)?;
        Ok(ForecastParameters {
            k: estimate.omori.k,
            c: estimate.omori.c,
            p: estimate.omori.p,
            b: estimate.b_value.b,
            ..base.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aftershock_forecast::estimation::EstimateSource;
    use test_fixtures::synthetic::{at_day, event};

    fn base() -> ForecastParameters {
        ForecastParameters {
            k: 0.3,
            c: 0.3,
            p: 1.1,
            b: 1.0,
            magnitude_threshold: 5.0,
            radius_km: 250.0,
            time_window_days: 7.0,
            reference_magnitude: None,
            lookback_days: Some(30.0),
            max_expected_count: Some(2.0),
        }
    }

    #[test]
    fn sparse_region_keeps_fallbacks_and_base_fields() {
        let mainshock = event(at_day(0.0), 5.0, 5.0, 6.8);
        let catalog =
            EventCatalog::new(vec![mainshock.clone(), event(at_day(1.0), 5.0, 5.1, 4.9)]).unwrap();
        let fitter =
            RegionalFitter::new(EstimationConfig::default(), &CalibrationConfig::regional())
                .unwrap();

        let estimate = fitter.estimate(&catalog, &mainshock, 250.0).unwrap();
        assert_eq!(estimate.b_value.source, EstimateSource::Fallback);
        assert_eq!(estimate.omori.source, EstimateSource::Fallback);

        let params = fitter.parameters(&catalog, &mainshock, &base()).unwrap();
        assert_eq!((params.k, params.c, params.p, params.b), (0.3, 0.3, 1.1, 1.0));
        assert_eq!(params.lookback_days, Some(30.0));
        assert_eq!(params.max_expected_count, Some(2.0));
        assert_eq!(params.reference_magnitude, None);
    }

    #[test]
    fn fixed_intercept_is_rejected() {
        let calibration = CalibrationConfig {
            productivity_a: Some(0.0),
            ..CalibrationConfig::regional()
        };
        assert!(RegionalFitter::new(EstimationConfig::default(), &calibration).is_err());
    }
}
