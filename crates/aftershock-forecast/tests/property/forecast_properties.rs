//! Property tests for the forecast laws.

use aftershock_core::models::occurrence_probability;
use aftershock_forecast::{gutenberg_richter, haversine_km, omori};
use proptest::prelude::*;

proptest! {
    #[test]
    fn omori_is_continuous_through_p_equal_one(
        k in 0.01f64..10.0,
        c in 0.01f64..5.0,
        t_end in 0.1f64..365.0,
        eps in 2e-6f64..1e-5,
    ) {
        let at_one = omori::expected_count(k, c, 1.0, 0.0, t_end).unwrap();
        let above = omori::expected_count(k, c, 1.0 + eps, 0.0, t_end).unwrap();
        let below = omori::expected_count(k, c, 1.0 - eps, 0.0, t_end).unwrap();
        prop_assert!((above - at_one).abs() <= 1e-4 * at_one);
        prop_assert!((below - at_one).abs() <= 1e-4 * at_one);
    }

    #[test]
    fn omori_count_grows_with_window_end(
        k in 0.01f64..10.0,
        c in 0.01f64..5.0,
        p in 0.5f64..2.0,
        t_end in 0.1f64..100.0,
        extra in 0.01f64..100.0,
    ) {
        let short = omori::expected_count(k, c, p, 0.0, t_end).unwrap();
        let long = omori::expected_count(k, c, p, 0.0, t_end + extra).unwrap();
        prop_assert!(short >= 0.0);
        prop_assert!(long >= short);
    }

    #[test]
    fn omori_count_is_linear_in_k(
        k in 0.01f64..10.0,
        c in 0.01f64..5.0,
        p in 0.5f64..2.0,
        t_end in 0.1f64..100.0,
    ) {
        let single = omori::expected_count(k, c, p, 0.0, t_end).unwrap();
        let double = omori::expected_count(2.0 * k, c, p, 0.0, t_end).unwrap();
        prop_assert!((double - 2.0 * single).abs() <= 1e-9 * double.max(1.0));
    }

    #[test]
    fn omori_count_falls_with_p_when_c_at_least_one(
        k in 0.01f64..10.0,
        c in 1.0f64..5.0,
        p in 0.5f64..1.9,
        dp in 0.01f64..0.1,
        t_end in 0.1f64..100.0,
    ) {
        let slower = omori::expected_count(k, c, p, 0.0, t_end).unwrap();
        let faster = omori::expected_count(k, c, p + dp, 0.0, t_end).unwrap();
        prop_assert!(faster <= slower);
    }

    #[test]
    fn interval_counts_add_up(
        k in 0.01f64..10.0,
        c in 0.01f64..5.0,
        p in 0.5f64..2.0,
        split in 0.1f64..10.0,
        extra in 0.1f64..10.0,
    ) {
        let head = omori::expected_count(k, c, p, 0.0, split).unwrap();
        let tail = omori::expected_count(k, c, p, split, split + extra).unwrap();
        let whole = omori::expected_count(k, c, p, 0.0, split + extra).unwrap();
        prop_assert!((head + tail - whole).abs() <= 1e-9 * whole.max(1.0));
    }

    #[test]
    fn exceedance_falls_with_threshold(
        b in 0.5f64..2.0,
        floor in 2.0f64..5.0,
        threshold in 2.0f64..9.0,
        step in 0.01f64..1.0,
    ) {
        let lower = gutenberg_richter::exceedance_fraction(b, threshold, floor).unwrap();
        let higher = gutenberg_richter::exceedance_fraction(b, threshold + step, floor).unwrap();
        prop_assert!((0.0..=1.0).contains(&lower));
        prop_assert!(higher <= lower);
    }

    #[test]
    fn probability_is_monotone_and_below_one(lambda in 0.0f64..1e6, step in 0.0f64..10.0) {
        let p = occurrence_probability(lambda);
        prop_assert!((0.0..1.0).contains(&p));
        prop_assert!(occurrence_probability(lambda + step) >= p);
    }

    #[test]
    fn haversine_is_symmetric_and_bounded(
        lat1 in -90.0f64..90.0,
        lon1 in -180.0f64..180.0,
        lat2 in -90.0f64..90.0,
        lon2 in -180.0f64..180.0,
    ) {
        let there = haversine_km(lat1, lon1, lat2, lon2);
        let back = haversine_km(lat2, lon2, lat1, lon1);
        prop_assert!(there >= 0.0);
        prop_assert!((there - back).abs() < 1e-6);
        prop_assert!(there <= std::f64::consts::PI * 6371.0 + 1e-6);
    }
}
