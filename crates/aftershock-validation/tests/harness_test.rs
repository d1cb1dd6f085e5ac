use aftershock_core::config::{ParameterMode, ValidationConfig};
use aftershock_core::errors::{AftershockError, AftershockErrorCode};
use aftershock_core::traits::IForecaster;
use aftershock_core::{
    AftershockResult, CalibrationConfig, EarthquakeEvent, EventCatalog, ForecastParameters,
    ForecastResult, ForecastWindow,
};
use aftershock_forecast::ProbabilityEngine;
use aftershock_validation::ValidationHarness;
use test_fixtures::synthetic::{at_day, destination, event, synthetic_catalog};

/// Returns the same probability for every query.
struct FixedForecaster {
    probability: f64,
}

impl IForecaster for FixedForecaster {
    fn forecast(
        &self,
        reference: &EarthquakeEvent,
        _catalog: &EventCatalog,
        params: &ForecastParameters,
    ) -> AftershockResult<ForecastResult> {
        let window = ForecastWindow::from_origin(reference.time, params.time_window_days)?;
        let mut result = ForecastResult::empty(window, params.magnitude_threshold);
        result.probability = self.probability;
        Ok(result)
    }
}

fn params() -> ForecastParameters {
    ForecastParameters {
        k: 0.3,
        c: 0.3,
        p: 1.1,
        b: 1.0,
        magnitude_threshold: 5.0,
        radius_km: 250.0,
        time_window_days: 1.0,
        reference_magnitude: None,
        lookback_days: None,
        max_expected_count: None,
    }
}

fn config(windows: &[f64], threshold: f64) -> ValidationConfig {
    ValidationConfig {
        mainshock_count: 2,
        time_windows_days: windows.to_vec(),
        target_magnitude: 5.0,
        decision_threshold: threshold,
        parallel: false,
        parameter_mode: ParameterMode::Fixed,
    }
}

/// Mainshock A (M7) with an M5.5 aftershock after half a day; mainshock B
/// (M6.5) followed only by small events.
fn two_sequences() -> EventCatalog {
    let (a_lat, a_lon) = destination(30.0, 0.0, 20.0, 90.0);
    let (b_lat, b_lon) = destination(-30.0, 60.0, 15.0, 200.0);
    EventCatalog::new(vec![
        event(at_day(10.0), 30.0, 0.0, 7.0),
        event(at_day(10.5), a_lat, a_lon, 5.5),
        event(at_day(50.0), -30.0, 60.0, 6.5),
        event(at_day(52.0), b_lat, b_lon, 4.6),
    ])
    .unwrap()
}

#[test]
fn records_are_mainshock_major_in_window_order() {
    let forecaster = FixedForecaster { probability: 0.3 };
    let harness = ValidationHarness::new(&forecaster, config(&[1.0, 7.0], 0.5));
    let report = harness.run(&two_sequences(), &params()).unwrap();

    let order: Vec<(f64, f64)> = report
        .records
        .iter()
        .map(|r| (r.mainshock.magnitude, r.window_days))
        .collect();
    assert_eq!(order, vec![(7.0, 1.0), (7.0, 7.0), (6.5, 1.0), (6.5, 7.0)]);
    assert_eq!(report.summaries.len(), 2);
    assert_eq!(report.summaries[0].window_days, 1.0);
    assert_eq!(report.summaries[1].window_days, 7.0);
}

#[test]
fn always_predicting_occurrence_scores_hits_and_false_alarms() {
    let forecaster = FixedForecaster { probability: 0.3 };
    let harness = ValidationHarness::new(&forecaster, config(&[1.0, 7.0], 0.0));
    let report = harness.run(&two_sequences(), &params()).unwrap();

    for summary in &report.summaries {
        assert_eq!(summary.total, 2);
        assert_eq!(summary.hits, 1);
        assert_eq!(summary.false_alarms, 1);
        assert_eq!(summary.misses, 0);
        assert_eq!(summary.correct_negatives, 0);
        assert_eq!(summary.accuracy, 0.5);
        assert_eq!(summary.accuracy_percent(), 50.0);
        // ((0.3 - 1)^2 + 0.3^2) / 2
        assert!((summary.brier_score - 0.29).abs() < 1e-12);
    }
}

#[test]
fn never_predicting_occurrence_scores_misses_and_correct_negatives() {
    let forecaster = FixedForecaster { probability: 0.3 };
    let harness = ValidationHarness::new(&forecaster, config(&[1.0], 1.0));
    let report = harness.run(&two_sequences(), &params()).unwrap();

    let summary = report.summary_for(1.0).unwrap();
    assert_eq!(summary.misses, 1);
    assert_eq!(summary.correct_negatives, 1);
    assert_eq!(report.accuracy_by_window(), vec![(1.0, 0.5)]);
}

#[test]
fn threshold_is_inclusive() {
    let forecaster = FixedForecaster { probability: 0.5 };
    let harness = ValidationHarness::new(&forecaster, config(&[1.0], 0.5));
    let report = harness.run(&two_sequences(), &params()).unwrap();
    assert!(report.records.iter().all(|r| r.predicted_occurred));
}

#[test]
fn observation_window_is_half_open_and_strictly_after_mainshock() {
    let forecaster = FixedForecaster { probability: 0.0 };
    let mainshock = event(at_day(0.0), 10.0, 10.0, 7.0);
    let catalog = EventCatalog::new(vec![
        mainshock.clone(),
        // Simultaneous with the mainshock: not an aftershock.
        event(at_day(0.0), 10.0, 10.1, 6.0),
        // Exactly at the end of the one-day window.
        event(at_day(1.0), 10.0, 10.1, 5.0),
    ])
    .unwrap();
    let mut config = config(&[1.0, 7.0], 0.5);
    config.mainshock_count = 1;

    let report = ValidationHarness::new(&forecaster, config)
        .run(&catalog, &params())
        .unwrap();
    assert!(!report.records[0].observed_occurred);
    // The window-edge event has exactly the target magnitude.
    assert!(report.records[1].observed_occurred);
}

#[test]
fn observation_respects_radius_and_target() {
    let forecaster = FixedForecaster { probability: 0.0 };
    let (far_lat, far_lon) = destination(10.0, 10.0, 300.0, 0.0);
    let catalog = EventCatalog::new(vec![
        event(at_day(0.0), 10.0, 10.0, 7.0),
        event(at_day(0.5), far_lat, far_lon, 6.0),
        event(at_day(0.5), 10.0, 10.0, 4.9),
    ])
    .unwrap();
    let mut config = config(&[7.0], 0.5);
    config.mainshock_count = 1;

    let report = ValidationHarness::new(&forecaster, config)
        .run(&catalog, &params())
        .unwrap();
    assert!(!report.records[0].observed_occurred);
}

#[test]
fn invalid_runs_are_rejected() {
    let forecaster = FixedForecaster { probability: 0.3 };

    let err = ValidationHarness::new(&forecaster, config(&[1.0], 0.5))
        .run(&EventCatalog::empty(), &params())
        .unwrap_err();
    assert!(matches!(err, AftershockError::EmptyCatalog));
    assert_eq!(err.error_code(), "EMPTY_CATALOG");

    let mut none = config(&[1.0], 0.5);
    none.mainshock_count = 0;
    let broken = [
        none,
        config(&[], 0.5),
        config(&[1.0, -7.0], 0.5),
        config(&[f64::NAN], 0.5),
        config(&[1.0], 1.5),
        config(&[1.0], -0.1),
        config(&[1.0, 7.0, 1.0], 0.5),
    ];
    for cfg in broken {
        let err = ValidationHarness::new(&forecaster, cfg)
            .run(&two_sequences(), &params())
            .unwrap_err();
        assert!(matches!(err, AftershockError::InvalidParameter { .. }), "{err}");
    }
}

#[test]
fn forecaster_errors_propagate() {
    let engine = ProbabilityEngine::new(CalibrationConfig::default());
    let err = ValidationHarness::new(&engine, config(&[1.0], 0.5))
        .run(&two_sequences(), &params())
        .unwrap_err();
    assert!(matches!(err, AftershockError::Configuration { .. }), "{err}");
}

#[test]
fn parallel_and_sequential_reports_are_identical() {
    let catalog = synthetic_catalog(42, 12);
    let engine = ProbabilityEngine::new(CalibrationConfig::regional());
    let mut sequential = config(&[1.0, 7.0, 30.0], 0.5);
    sequential.mainshock_count = 10;
    let mut parallel = sequential.clone();
    parallel.parallel = true;

    let a = ValidationHarness::new(&engine, sequential)
        .run(&catalog, &params())
        .unwrap();
    let b = ValidationHarness::new(&engine, parallel.clone())
        .run(&catalog, &params())
        .unwrap();
    let c = ValidationHarness::new(&engine, parallel)
        .run(&catalog, &params())
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(b, c);
    assert_eq!(a.records.len(), 30);
}

#[test]
fn regional_fit_needs_calibration() {
    let engine = ProbabilityEngine::new(CalibrationConfig::regional());
    let mut cfg = config(&[7.0], 0.5);
    cfg.parameter_mode = ParameterMode::RegionalFit;

    let err = ValidationHarness::new(&engine, cfg.clone())
        .run(&two_sequences(), &params())
        .unwrap_err();
    assert!(matches!(err, AftershockError::Configuration { .. }), "{err}");

    let fixed_a = CalibrationConfig {
        productivity_a: Some(-0.5),
        ..CalibrationConfig::regional()
    };
    let err = ValidationHarness::new(&engine, cfg)
        .with_calibration(fixed_a)
        .run(&two_sequences(), &params())
        .unwrap_err();
    assert!(matches!(err, AftershockError::Configuration { .. }), "{err}");
}

#[test]
fn regional_fit_runs_on_synthetic_sequences() {
    let catalog = synthetic_catalog(7, 6);
    let calibration = CalibrationConfig::regional();
    let engine = ProbabilityEngine::new(calibration.clone());
    let mut cfg = config(&[1.0, 7.0, 30.0], 0.5);
    cfg.mainshock_count = 6;
    cfg.parameter_mode = ParameterMode::RegionalFit;
    cfg.parallel = true;

    let report = ValidationHarness::new(&engine, cfg)
        .with_calibration(calibration)
        .run(&catalog, &params())
        .unwrap();
    assert_eq!(report.records.len(), 18);
    for record in &report.records {
        assert!((0.0..1.0).contains(&record.predicted_probability));
    }
    let summary = report.summary_for(30.0).unwrap();
    assert_eq!(
        summary.hits + summary.misses + summary.false_alarms + summary.correct_negatives,
        6
    );
}

#[test]
fn bam_fixture_back_test() {
    let catalog = test_fixtures::load_catalog("bam_2003.json");
    let engine = ProbabilityEngine::new(CalibrationConfig::regional());
    let report = ValidationHarness::new(&engine, config(&[1.0, 7.0], 0.5))
        .run(&catalog, &params())
        .unwrap();

    let observed: Vec<(f64, f64, bool)> = report
        .records
        .iter()
        .map(|r| (r.mainshock.magnitude, r.window_days, r.observed_occurred))
        .collect();
    assert_eq!(
        observed,
        vec![
            (6.6, 1.0, false),
            (6.6, 7.0, true),
            (6.3, 1.0, false),
            (6.3, 7.0, false),
        ]
    );
}

#[test]
fn report_exports_as_json() {
    let forecaster = FixedForecaster { probability: 0.3 };
    let report = ValidationHarness::new(&forecaster, config(&[1.0, 7.0], 0.5))
        .run(&two_sequences(), &params())
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["records"].as_array().unwrap().len(), 4);
    assert_eq!(json["summaries"][1]["window_days"], 7.0);
    assert_eq!(json["decision_threshold"], 0.5);
}
