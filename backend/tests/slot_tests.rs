//! Slot resolution integration tests

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Timelike};
use proptest::prelude::*;
use shared::{parse_date_time_param, DateTimeParam, DayNight, SlotSchedule};

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 11, 1)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_afternoon_resolves_to_midday_slot() {
        let resolved = SlotSchedule::default().resolve(at(14, 0));
        assert_eq!(resolved.slot, at(13, 0));
        assert_eq!(resolved.day_night, DayNight::Day);
    }

    #[test]
    fn test_before_first_slot_uses_first_slot() {
        let resolved = SlotSchedule::default().resolve(at(3, 59));
        assert_eq!(resolved.slot, at(7, 0));
        assert_eq!(resolved.day_night, DayNight::Day);
    }

    #[test]
    fn test_evening_slot_is_night() {
        let resolved = SlotSchedule::default().resolve(at(23, 30));
        assert_eq!(resolved.slot, at(19, 0));
        assert_eq!(resolved.day_night, DayNight::Night);
    }

    #[test]
    fn test_exact_slot_time_is_kept() {
        assert_eq!(SlotSchedule::default().resolve(at(19, 0)).slot, at(19, 0));
    }

    #[test]
    fn test_utc_dt_param_resolves_in_local_time() {
        let bangkok = FixedOffset::east_opt(7 * 3600).unwrap();
        let parsed = parse_date_time_param(Some("2025-11-01T07:00:00Z"), &bangkok).unwrap();
        let DateTimeParam::At(dt) = parsed else {
            panic!("expected explicit time");
        };
        let resolved = SlotSchedule::default().resolve(dt.with_timezone(&bangkok).naive_local());
        assert_eq!(resolved.slot, at(13, 0));
        assert_eq!(
            bangkok.from_local_datetime(&resolved.slot).unwrap().to_rfc3339(),
            "2025-11-01T13:00:00+07:00"
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn schedule_strategy() -> impl Strategy<Value = SlotSchedule> {
        prop::collection::vec(0u32..24, 1..6).prop_map(|hours| SlotSchedule::new(hours).unwrap())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// The slot is on the same day and is one of the schedule's hours
        #[test]
        fn prop_slot_is_scheduled_hour_same_day(
            schedule in schedule_strategy(),
            h in 0u32..24,
            m in 0u32..60
        ) {
            let resolved = schedule.resolve(at(h, m));
            prop_assert_eq!(resolved.slot.date(), at(h, m).date());
            prop_assert_eq!(resolved.slot.minute(), 0);
            prop_assert!(schedule.hours().contains(&resolved.slot.hour()));
        }

        /// The slot is the latest one not after the input, if any exists
        #[test]
        fn prop_slot_is_latest_not_after(
            schedule in schedule_strategy(),
            h in 0u32..24,
            m in 0u32..60
        ) {
            let resolved = schedule.resolve(at(h, m));
            let first = schedule.hours()[0];
            if h < first {
                prop_assert_eq!(resolved.slot.hour(), first);
            } else {
                prop_assert!(resolved.slot <= at(h, m));
                for &other in schedule.hours() {
                    prop_assert!(other <= resolved.slot.hour() || other > h);
                }
            }
        }

        /// Day and night follow the slot hour
        #[test]
        fn prop_day_night_follows_slot(schedule in schedule_strategy(), h in 0u32..24) {
            let resolved = schedule.resolve(at(h, 0));
            prop_assert_eq!(resolved.day_night, DayNight::from_hour(resolved.slot.hour()));
        }
    }
}
