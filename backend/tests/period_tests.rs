//! Period aggregation integration tests
//!
//! Tests for monthly and weekly averages including:
//! - Week-of-month partition of a month's days
//! - Means over non-null values only
//! - Month resolution for AUTO and explicit months

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    period::{aggregate_monthly, aggregate_weekly},
    MonthParam, PeriodSample, Region, WeekOfMonth, YearMonth,
};
use weather_dashboard_backend::services::dashboard::resolve_month;

fn month(y: i32, m: u32) -> YearMonth {
    YearMonth::new(y, m).unwrap()
}

fn sample(region: Region, day: u32, rain: Option<i32>) -> PeriodSample {
    PeriodSample {
        region,
        date: NaiveDate::from_ymd_opt(2025, 11, day).unwrap(),
        rain_pct: rain,
        min_temperature_c: Some(Decimal::new(250, 1)),
        max_temperature_c: Some(Decimal::new(330, 1)),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// One 100% row among a month of dry rows averages to its share
    #[test]
    fn test_single_wet_slot_is_averaged_over_all_rows() {
        let mut samples = Vec::new();
        for day in 1..=30 {
            for slot in 0..3 {
                let rain = if day == 1 && slot == 0 { 100 } else { 0 };
                samples.push(sample(Region::Central, day, Some(rain)));
            }
        }

        let result = aggregate_monthly(month(2025, 11), &samples);
        let central = &result[&Region::Central];
        assert_eq!(central.count, 90);
        assert_eq!(central.avg_rain_pct, Some(Decimal::new(111, 2)));
        assert_eq!(central.avg_min_temperature_c, Some(Decimal::new(2500, 2)));
    }

    #[test]
    fn test_null_values_excluded_from_mean_but_counted() {
        let samples = vec![
            sample(Region::North, 3, Some(40)),
            sample(Region::North, 4, None),
            sample(Region::North, 5, Some(20)),
        ];
        let result = aggregate_monthly(month(2025, 11), &samples);
        let north = &result[&Region::North];
        assert_eq!(north.count, 3);
        assert_eq!(north.avg_rain_pct, Some(Decimal::from(30)));
    }

    #[test]
    fn test_region_without_values_has_no_average() {
        let samples = vec![sample(Region::East, 10, None)];
        let result = aggregate_monthly(month(2025, 11), &samples);
        assert_eq!(result[&Region::East].avg_rain_pct, None);
        assert!(!result.contains_key(&Region::North));
    }

    #[test]
    fn test_rows_outside_month_ignored() {
        let mut outside = sample(Region::Central, 1, Some(100));
        outside.date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        let result = aggregate_monthly(month(2025, 11), &[outside]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_weekly_buckets() {
        let samples = vec![
            sample(Region::Central, 1, Some(10)),
            sample(Region::Central, 7, Some(30)),
            sample(Region::Central, 8, Some(50)),
            sample(Region::Central, 30, Some(70)),
        ];
        let result = aggregate_weekly(month(2025, 11), &samples);
        assert_eq!(result.len(), 3);
        assert_eq!(
            result[&(Region::Central, WeekOfMonth::from_day(1))].avg_rain_pct,
            Some(Decimal::from(20))
        );
        assert_eq!(result[&(Region::Central, WeekOfMonth::from_day(8))].count, 1);
        assert_eq!(result[&(Region::Central, WeekOfMonth::from_day(29))].count, 1);
    }

    #[test]
    fn test_week_labels() {
        let november = month(2025, 11);
        assert_eq!(WeekOfMonth::from_day(1).label_th(november), "สัปดาห์ที่ 1 (1-7)");
        assert_eq!(WeekOfMonth::from_day(22).label_th(november), "สัปดาห์ที่ 4 (22-30)");
        assert_eq!(WeekOfMonth::from_day(22).label_th(month(2024, 2)), "สัปดาห์ที่ 4 (22-29)");
    }

    #[test]
    fn test_resolve_month() {
        let newest_first = [month(2026, 1), month(2025, 12), month(2025, 11)];
        assert_eq!(resolve_month(MonthParam::Auto, &newest_first), Some(month(2026, 1)));
        assert_eq!(
            resolve_month(MonthParam::Month(month(2025, 11)), &newest_first),
            Some(month(2025, 11))
        );
        assert_eq!(
            resolve_month(MonthParam::Month(month(2024, 1)), &newest_first),
            Some(month(2026, 1))
        );
        assert_eq!(resolve_month(MonthParam::Auto, &[]), None);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn month_strategy() -> impl Strategy<Value = YearMonth> {
        (2000i32..2100, 1u32..=12).prop_map(|(y, m)| month(y, m))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Every day falls in exactly one week bucket whose range holds it
        #[test]
        fn prop_weeks_partition_month(ym in month_strategy()) {
            let mut covered = 0;
            for week in WeekOfMonth::ALL {
                let (start, end) = week.day_range(ym);
                prop_assert!(start <= end);
                covered += end - start + 1;
            }
            prop_assert_eq!(covered, ym.days_in_month());

            let mut day = ym.first_day();
            while ym.contains(day) {
                let (start, end) = WeekOfMonth::from_day(day.day()).day_range(ym);
                prop_assert!(start <= day.day() && day.day() <= end);
                day = day.succ_opt().unwrap();
            }
        }

        /// The monthly mean lies between the smallest and largest value
        #[test]
        fn prop_mean_within_bounds(rains in prop::collection::vec(0i32..=100, 1..60)) {
            let samples: Vec<_> = rains
                .iter()
                .enumerate()
                .map(|(i, r)| sample(Region::North, (i % 30) as u32 + 1, Some(*r)))
                .collect();
            let result = aggregate_monthly(month(2025, 11), &samples);
            let avg = result[&Region::North].avg_rain_pct.unwrap();
            let min = Decimal::from(*rains.iter().min().unwrap());
            let max = Decimal::from(*rains.iter().max().unwrap());
            prop_assert!(avg >= min && avg <= max);
            prop_assert_eq!(result[&Region::North].count, rains.len());
        }

        /// Weekly counts add up to the monthly count
        #[test]
        fn prop_weekly_counts_sum_to_monthly(days in prop::collection::vec(1u32..=30, 1..80)) {
            let samples: Vec<_> = days.iter().map(|d| sample(Region::East, *d, Some(10))).collect();
            let monthly = aggregate_monthly(month(2025, 11), &samples);
            let weekly = aggregate_weekly(month(2025, 11), &samples);
            let weekly_total: usize = weekly.values().map(|a| a.count).sum();
            prop_assert_eq!(weekly_total, monthly[&Region::East].count);
        }
    }
}
