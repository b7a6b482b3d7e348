//! Month and week-of-month periods with per-region averaging

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::models::Region;

/// Calendar month, written `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(DomainError::InvalidMonth(format!("{:04}-{:02}", year, month)));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// The month that follows this one
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.succ().first_day();
        next.signed_duration_since(self.first_day()).num_days() as u32
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first_day()
            .with_day(self.days_in_month())
            .unwrap_or_else(|| self.first_day())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidMonth(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4
            || month.len() != 2
            || !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

/// Fixed day-of-month bucket: 1-7, 8-14, 15-21, 22-end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekOfMonth(u8);

impl WeekOfMonth {
    pub const ALL: [WeekOfMonth; 4] = [WeekOfMonth(1), WeekOfMonth(2), WeekOfMonth(3), WeekOfMonth(4)];

    pub fn from_day(day: u32) -> Self {
        match day {
            0..=7 => WeekOfMonth(1),
            8..=14 => WeekOfMonth(2),
            15..=21 => WeekOfMonth(3),
            _ => WeekOfMonth(4),
        }
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    /// Inclusive first and last day of this bucket in `month`
    pub fn day_range(&self, month: YearMonth) -> (u32, u32) {
        let start = u32::from(self.0 - 1) * 7 + 1;
        let end = if self.0 == 4 {
            month.days_in_month()
        } else {
            start + 6
        };
        (start, end)
    }

    pub fn label_th(&self, month: YearMonth) -> String {
        let (start, end) = self.day_range(month);
        format!("สัปดาห์ที่ {} ({}-{})", self.0, start, end)
    }
}

/// Values of one stored forecast that feed the period averages
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSample {
    pub region: Region,
    /// Local calendar date of the forecast slot
    pub date: NaiveDate,
    pub rain_pct: Option<i32>,
    pub min_temperature_c: Option<Decimal>,
    pub max_temperature_c: Option<Decimal>,
}

/// Averages of one region over a period
///
/// Each average covers only rows that carry the value; `count` is every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionAverages {
    pub avg_rain_pct: Option<Decimal>,
    pub avg_min_temperature_c: Option<Decimal>,
    pub avg_max_temperature_c: Option<Decimal>,
    pub count: usize,
}

#[derive(Default)]
struct Mean {
    sum: Decimal,
    n: u32,
}

impl Mean {
    fn push(&mut self, value: Option<Decimal>) {
        if let Some(v) = value {
            self.sum += v;
            self.n += 1;
        }
    }

    fn finish(&self) -> Option<Decimal> {
        (self.n > 0).then(|| {
            (self.sum / Decimal::from(self.n))
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        })
    }
}

#[derive(Default)]
struct Accumulator {
    rain: Mean,
    min_temp: Mean,
    max_temp: Mean,
    count: usize,
}

impl Accumulator {
    fn push(&mut self, sample: &PeriodSample) {
        self.rain.push(sample.rain_pct.map(Decimal::from));
        self.min_temp.push(sample.min_temperature_c);
        self.max_temp.push(sample.max_temperature_c);
        self.count += 1;
    }

    fn finish(&self) -> RegionAverages {
        RegionAverages {
            avg_rain_pct: self.rain.finish(),
            avg_min_temperature_c: self.min_temp.finish(),
            avg_max_temperature_c: self.max_temp.finish(),
            count: self.count,
        }
    }
}

fn aggregate_by<K: Ord>(
    month: YearMonth,
    samples: &[PeriodSample],
    key: impl Fn(&PeriodSample) -> K,
) -> BTreeMap<K, RegionAverages> {
    let mut groups: BTreeMap<K, Accumulator> = BTreeMap::new();
    for sample in samples.iter().filter(|s| month.contains(s.date)) {
        groups.entry(key(sample)).or_default().push(sample);
    }
    groups.into_iter().map(|(k, acc)| (k, acc.finish())).collect()
}

/// Per-region averages over the whole month; regions without rows are absent
pub fn aggregate_monthly(
    month: YearMonth,
    samples: &[PeriodSample],
) -> BTreeMap<Region, RegionAverages> {
    aggregate_by(month, samples, |s| s.region)
}

/// Per-region averages for each week-of-month bucket that has rows
pub fn aggregate_weekly(
    month: YearMonth,
    samples: &[PeriodSample],
) -> BTreeMap<(Region, WeekOfMonth), RegionAverages> {
    aggregate_by(month, samples, |s| (s.region, WeekOfMonth::from_day(s.date.day())))
}
