//! Daily forecast slots and resolution of "now" to a slot

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::DomainError;
use crate::models::DayNight;

/// Slots synthesized for every day
pub const DEFAULT_SLOT_HOURS: [u32; 3] = [7, 13, 19];

/// Validated ascending list of slot hours
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSchedule {
    hours: Vec<u32>,
}

/// Slot picked for a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSlot {
    pub slot: NaiveDateTime,
    pub day_night: DayNight,
}

impl SlotSchedule {
    /// Sorts and deduplicates `hours`; rejects an empty list or hours past 23
    pub fn new(hours: impl IntoIterator<Item = u32>) -> Result<Self, DomainError> {
        let mut hours: Vec<u32> = hours.into_iter().collect();
        if let Some(bad) = hours.iter().find(|h| **h > 23) {
            return Err(DomainError::InvalidSlotHour(*bad));
        }
        hours.sort_unstable();
        hours.dedup();
        if hours.is_empty() {
            return Err(DomainError::EmptySchedule);
        }
        Ok(Self { hours })
    }

    pub fn hours(&self) -> &[u32] {
        &self.hours
    }

    /// Latest slot at or before `at` on the same day, else that day's first slot
    pub fn resolve(&self, at: NaiveDateTime) -> ResolvedSlot {
        let hour = self
            .hours
            .iter()
            .rev()
            .copied()
            .find(|h| *h <= at.hour())
            .unwrap_or(self.hours[0]);

        ResolvedSlot {
            slot: slot_at(at.date(), hour),
            day_night: DayNight::from_hour(hour),
        }
    }

    /// Every slot of `date` in ascending order
    pub fn slots_for_date(&self, date: NaiveDate) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.hours.iter().map(move |h| slot_at(date, *h))
    }
}

impl Default for SlotSchedule {
    fn default() -> Self {
        Self {
            hours: DEFAULT_SLOT_HOURS.to_vec(),
        }
    }
}

fn slot_at(date: NaiveDate, hour: u32) -> NaiveDateTime {
    // Hours are validated to 0..=23 on construction.
    date.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN))
}
