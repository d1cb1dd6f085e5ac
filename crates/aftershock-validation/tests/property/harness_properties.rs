//! Property tests for back-test scoring.

use aftershock_core::config::{ParameterMode, ValidationConfig};
use aftershock_core::{CalibrationConfig, ForecastParameters};
use aftershock_forecast::ProbabilityEngine;
use aftershock_validation::ValidationHarness;
use proptest::prelude::*;
use test_fixtures::synthetic::synthetic_catalog;

fn params(b: f64) -> ForecastParameters {
    ForecastParameters {
        k: 0.3,
        c: 0.3,
        p: 1.1,
        b,
        magnitude_threshold: 5.0,
        radius_km: 250.0,
        time_window_days: 1.0,
        reference_magnitude: None,
        lookback_days: None,
        max_expected_count: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn summaries_partition_the_records(
        seed in 0u64..1000,
        mainshocks in 1usize..8,
        threshold in 0.0f64..=1.0,
        b in 0.6f64..1.6,
    ) {
        let catalog = synthetic_catalog(seed, 5);
        let engine = ProbabilityEngine::new(CalibrationConfig::regional());
        let config = ValidationConfig {
            mainshock_count: mainshocks,
            time_windows_days: vec![1.0, 7.0],
            target_magnitude: 5.0,
            decision_threshold: threshold,
            parallel: true,
            parameter_mode: ParameterMode::Fixed,
        };
        let report = ValidationHarness::new(&engine, config)
            .run(&catalog, &params(b))
            .unwrap();

        let selected = mainshocks.min(catalog.len());
        prop_assert_eq!(report.records.len(), 2 * selected);
        for summary in &report.summaries {
            prop_assert_eq!(summary.total, selected);
            prop_assert_eq!(
                summary.hits + summary.misses + summary.false_alarms + summary.correct_negatives,
                summary.total
            );
            prop_assert_eq!(summary.correct, summary.hits + summary.correct_negatives);
            prop_assert!((0.0..=1.0).contains(&summary.accuracy));
            prop_assert!((0.0..=1.0).contains(&summary.brier_score));
        }
    }

    #[test]
    fn longer_windows_never_lower_predictions(seed in 0u64..1000) {
        let catalog = synthetic_catalog(seed, 4);
        let engine = ProbabilityEngine::new(CalibrationConfig::regional());
        let config = ValidationConfig {
            mainshock_count: 4,
            time_windows_days: vec![1.0, 7.0, 30.0],
            target_magnitude: 5.0,
            decision_threshold: 0.5,
            parallel: false,
            parameter_mode: ParameterMode::Fixed,
        };
        let report = ValidationHarness::new(&engine, config)
            .run(&catalog, &params(1.0))
            .unwrap();
        for per_mainshock in report.records.chunks(3) {
            prop_assert!(per_mainshock[0].predicted_probability <= per_mainshock[1].predicted_probability);
            prop_assert!(per_mainshock[1].predicted_probability <= per_mainshock[2].predicted_probability);
        }
    }
}
