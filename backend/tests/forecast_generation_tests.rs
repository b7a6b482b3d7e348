//! Forecast generation integration tests
//!
//! Tests for synthesized forecasts including:
//! - Determinism of the seeded generator
//! - Percentage bounds and sky-cover consistency
//! - Per-region field visibility

use chrono::NaiveDate;
use proptest::prelude::*;
use shared::{
    fields::{pick_region_fields, FIELDS_PER_REGION},
    rng::{hash_key, round1, round_half_up},
    FieldKey, ForecastSynthesizer, Region, SeededRng,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// FNV-1a over the UTF-16 code units of the key
    #[test]
    fn test_hash_key_known_values() {
        assert_eq!(hash_key(""), 0x811c9dc5);
        assert_eq!(hash_key("a"), 0xe40c292c);
        assert_eq!(hash_key("fields:ภาคกลาง"), 0x3efd494d);
    }

    #[test]
    fn test_rng_stream_repeats_for_same_key() {
        let mut a = SeededRng::from_key("ภาคกลาง|2025-11-01|7");
        let mut b = SeededRng::from_key("ภาคกลาง|2025-11-01|7");
        for _ in 0..32 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn test_rounding_helpers() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round1(27.25), 27.3);
    }

    /// The central region's field set is a regression fixture
    #[test]
    fn test_central_field_set_is_stable() {
        let first = pick_region_fields(Region::Central);
        for _ in 0..10 {
            assert_eq!(pick_region_fields(Region::Central), first);
        }
        assert_eq!(first.len(), FIELDS_PER_REGION);
        assert!(first.has_weather_condition());

        let expected = [
            FieldKey::PartlyCloudyPct,
            FieldKey::CloudyPct,
            FieldKey::RainPct,
            FieldKey::FogPct,
            FieldKey::MaxTempC,
            FieldKey::NearbyAreas,
        ];
        for key in expected {
            assert!(first.contains(key), "missing {}", key.as_str());
        }
    }

    #[test]
    fn test_cached_fields_match_fresh_pick() {
        for region in Region::ALL {
            assert_eq!(shared::region_fields(region), &pick_region_fields(region));
        }
    }

    #[test]
    fn test_full_window_is_reproducible() {
        let synth = ForecastSynthesizer::new();
        let first: Vec<_> = date(2025, 11, 1)
            .iter_days()
            .take(5)
            .flat_map(|d| Region::ALL.map(|r| synth.synthesize(r, d, 13).unwrap()))
            .collect();
        let second: Vec<_> = date(2025, 11, 1)
            .iter_days()
            .take(5)
            .flat_map(|d| Region::ALL.map(|r| synth.synthesize(r, d, 13).unwrap()))
            .collect();
        assert_eq!(first, second);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn region_strategy() -> impl Strategy<Value = Region> {
        prop::sample::select(Region::ALL.to_vec())
    }

    fn date_strategy() -> impl Strategy<Value = NaiveDate> {
        (0i64..730).prop_map(|offset| date(2025, 1, 1) + chrono::Duration::days(offset))
    }

    fn hour_strategy() -> impl Strategy<Value = u32> {
        0u32..24
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Same inputs always give the same record
        #[test]
        fn prop_synthesis_is_deterministic(
            region in region_strategy(),
            day in date_strategy(),
            hour in hour_strategy()
        ) {
            let synth = ForecastSynthesizer::new();
            let a = synth.synthesize(region, day, hour).unwrap();
            let b = synth.synthesize(region, day, hour).unwrap();
            prop_assert_eq!(a, b);
        }

        /// Every percentage present lies in [0, 100]
        #[test]
        fn prop_percentages_bounded(
            region in region_strategy(),
            day in date_strategy(),
            hour in hour_strategy()
        ) {
            let record = ForecastSynthesizer::new().synthesize(region, day, hour).unwrap();
            for key in FieldKey::ALL {
                if let Some(pct) = record.percentage(key) {
                    prop_assert!((0..=100).contains(&pct), "{:?} = {}", key, pct);
                }
            }
        }

        /// Clear, partly cloudy and cloudy never exceed the whole sky
        #[test]
        fn prop_sky_cover_within_whole(
            region in region_strategy(),
            day in date_strategy(),
            hour in hour_strategy()
        ) {
            let record = ForecastSynthesizer::new().synthesize(region, day, hour).unwrap();
            let total: i32 = [record.clear_pct, record.partly_cloudy_pct, record.cloudy_pct]
                .into_iter()
                .flatten()
                .sum();
            prop_assert!(total <= 100);
        }

        /// Only fields visible for the region are populated
        #[test]
        fn prop_hidden_fields_are_absent(
            region in region_strategy(),
            day in date_strategy(),
            hour in hour_strategy()
        ) {
            let record = ForecastSynthesizer::new().synthesize(region, day, hour).unwrap();
            let fields = shared::region_fields(region);
            for key in FieldKey::ALL {
                if !fields.contains(key) {
                    prop_assert!(!record.has_field(key), "{:?} should be hidden", key);
                }
            }
        }

        /// Maximum temperature is never below the minimum
        #[test]
        fn prop_max_not_below_min(
            region in region_strategy(),
            day in date_strategy(),
            hour in hour_strategy()
        ) {
            let record = ForecastSynthesizer::new().synthesize(region, day, hour).unwrap();
            if let (Some(max), Some(min)) = (record.max_temperature_c, record.min_temperature_c) {
                prop_assert!(max >= min);
            }
        }

        /// Unit draws stay in [0, 1)
        #[test]
        fn prop_rng_unit_interval(seed in any::<u32>()) {
            let mut rng = SeededRng::new(seed);
            for _ in 0..16 {
                let x = rng.next_f64();
                prop_assert!((0.0..1.0).contains(&x));
            }
        }
    }
}
