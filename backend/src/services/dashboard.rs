//! Dashboard read models: daily slides and monthly/weekly summary cards

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use shared::display::{format_temperature, slide_items, thai_date_time_label, thai_month_label, SlideItem};
use shared::period::{aggregate_monthly, aggregate_weekly};
use shared::{
    DateTimeParam, DayNight, ForecastRecord, Language, MonthParam, Region, RegionAverages,
    SelectOption, SlotSchedule, WeekOfMonth, YearMonth, AUTO,
};

use crate::error::{AppError, AppResult};
use crate::services::forecast::ForecastService;

const AUTO_SLOT_LABEL: &str = "อัตโนมัติ (ตามเวลาปัจจุบัน)";
const AUTO_MONTH_LABEL: &str = "อัตโนมัติ (เดือนล่าสุด)";
const MONTHLY_DESC: &str = "สรุปค่าเฉลี่ยรายเดือนจากข้อมูลรายวัน";

/// Daily endpoint payload
#[derive(Debug, Serialize)]
pub struct DailyResponse {
    pub options: Vec<SelectOption>,
    pub resolved: DailyResolved,
    pub slides: Vec<Slide>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyResolved {
    pub dt_param: String,
    #[serde(rename = "slotISO")]
    pub slot_iso: String,
    #[serde(rename = "type")]
    pub day_night: DayNight,
}

/// One region's forecast card on the daily carousel
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: String,
    pub label: String,
    pub region: Region,
    pub main_temp: String,
    pub desc: String,
    pub items: Vec<SlideItem>,
    pub meta: SlideMeta,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SlideMeta {
    #[serde(rename = "slotISO")]
    pub slot_iso: String,
    #[serde(rename = "type")]
    pub day_night: DayNight,
}

/// Monthly and weekly endpoint payload
#[derive(Debug, Serialize)]
pub struct PeriodResponse<C> {
    pub options: Vec<SelectOption>,
    pub resolved: PeriodResolved,
    pub cards: Vec<C>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PeriodResolved {
    pub month_param: String,
    pub month: Option<String>,
    #[serde(rename = "startISO", skip_serializing_if = "Option::is_none")]
    pub start_iso: Option<String>,
    #[serde(rename = "endISO", skip_serializing_if = "Option::is_none")]
    pub end_iso: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCard {
    pub region: Region,
    pub desc: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub avg_rain_pct: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub avg_min_temp_c: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub avg_max_temp_c: Option<Decimal>,
    pub count: usize,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyCard {
    pub region: Region,
    pub week: u8,
    pub week_label: String,
    #[serde(rename = "startISO")]
    pub start_iso: String,
    #[serde(rename = "endISO")]
    pub end_iso: String,
    pub desc: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub avg_rain_pct: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub avg_min_temp_c: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub avg_max_temp_c: Option<Decimal>,
    pub count: usize,
}

/// Dashboard service assembling endpoint payloads
#[derive(Clone)]
pub struct DashboardService {
    forecasts: ForecastService,
    schedule: SlotSchedule,
    local: FixedOffset,
}

impl DashboardService {
    pub fn new(db: PgPool, schedule: SlotSchedule, local: FixedOffset) -> Self {
        Self {
            forecasts: ForecastService::new(db),
            schedule,
            local,
        }
    }

    /// Slides for the slot selected by `dt`, or by `now` when automatic
    pub async fn daily(
        &self,
        dt_param: &str,
        dt: DateTimeParam,
        lang: Language,
        now: DateTime<Utc>,
    ) -> AppResult<DailyResponse> {
        let times = self.forecasts.distinct_date_times().await?;
        let options = daily_options(&times, &self.local);

        let at = match dt {
            DateTimeParam::Auto => now.with_timezone(&self.local).naive_local(),
            DateTimeParam::At(at) => at.with_timezone(&self.local).naive_local(),
        };
        let resolved = self.schedule.resolve(at);
        let slot = to_utc(&self.local, resolved.slot)?;
        let slot_iso = iso(slot);

        tracing::debug!(slot = %slot_iso, day_night = %resolved.day_night, "Resolved daily slot");

        let rows = self.forecasts.forecasts_at(slot, resolved.day_night).await?;
        let slides = rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                let record = row.into_record(&self.local)?;
                Ok(build_slide(id, &record, &slot_iso, resolved.day_night, &lang))
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(DailyResponse {
            options,
            resolved: DailyResolved {
                dt_param: dt_param.to_string(),
                slot_iso,
                day_night: resolved.day_night,
            },
            slides,
        })
    }

    /// Per-region monthly averages
    pub async fn monthly(
        &self,
        month_param: &str,
        month: MonthParam,
    ) -> AppResult<PeriodResponse<MonthlyCard>> {
        let months = self.forecasts.available_months(&self.local).await?;
        let options = month_options(&months);

        let Some(resolved) = resolve_month(month, &months) else {
            return Ok(empty_period(month_param, options));
        };
        let (start, end) = self.month_window(resolved)?;
        let samples = self.samples(start, end).await?;

        let mut cards: Vec<MonthlyCard> = aggregate_monthly(resolved, &samples)
            .into_iter()
            .map(|(region, avg)| monthly_card(region, avg))
            .collect();
        cards.sort_by(|a, b| a.region.name_th().cmp(b.region.name_th()));

        Ok(PeriodResponse {
            options,
            resolved: period_resolved(month_param, resolved, start, end),
            cards,
        })
    }

    /// Per-region averages for each week-of-month bucket
    pub async fn weekly(
        &self,
        month_param: &str,
        month: MonthParam,
    ) -> AppResult<PeriodResponse<WeeklyCard>> {
        let months = self.forecasts.available_months(&self.local).await?;
        let options = month_options(&months);

        let Some(resolved) = resolve_month(month, &months) else {
            return Ok(empty_period(month_param, options));
        };
        let (start, end) = self.month_window(resolved)?;
        let samples = self.samples(start, end).await?;

        let mut cards = aggregate_weekly(resolved, &samples)
            .into_iter()
            .map(|((region, week), avg)| self.weekly_card(resolved, region, week, avg))
            .collect::<AppResult<Vec<_>>>()?;
        cards.sort_by(|a, b| {
            a.region
                .name_th()
                .cmp(b.region.name_th())
                .then(a.week.cmp(&b.week))
        });

        Ok(PeriodResponse {
            options,
            resolved: period_resolved(month_param, resolved, start, end),
            cards,
        })
    }

    async fn samples(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<shared::PeriodSample>> {
        self.forecasts
            .period_samples(start, end)
            .await?
            .into_iter()
            .map(|row| row.into_sample(&self.local))
            .collect()
    }

    /// Local-midnight bounds of a month in UTC, end exclusive
    fn month_window(&self, month: YearMonth) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
        Ok((
            local_midnight(&self.local, month.first_day())?,
            local_midnight(&self.local, month.succ().first_day())?,
        ))
    }

    fn weekly_card(
        &self,
        month: YearMonth,
        region: Region,
        week: WeekOfMonth,
        avg: RegionAverages,
    ) -> AppResult<WeeklyCard> {
        let (first, last) = week.day_range(month);
        let start = month.first_day() + chrono::Days::new(u64::from(first - 1));
        let end = month.first_day() + chrono::Days::new(u64::from(last));
        let week_label = week.label_th(month);

        Ok(WeeklyCard {
            region,
            week: week.number(),
            desc: format!("สรุปค่าเฉลี่ยรายสัปดาห์จากข้อมูลรายวัน ({})", week_label),
            week_label,
            start_iso: iso(local_midnight(&self.local, start)?),
            end_iso: iso(local_midnight(&self.local, end)?),
            avg_rain_pct: avg.avg_rain_pct,
            avg_min_temp_c: avg.avg_min_temperature_c,
            avg_max_temp_c: avg.avg_max_temperature_c,
            count: avg.count,
        })
    }
}

/// `AUTO` entry followed by every stored slot, oldest first
pub fn daily_options(times: &[DateTime<Utc>], local: &FixedOffset) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new(AUTO_SLOT_LABEL, AUTO))
        .chain(times.iter().map(|t| {
            SelectOption::new(
                thai_date_time_label(t.with_timezone(local).naive_local()),
                iso(*t),
            )
        }))
        .collect()
}

/// `AUTO` entry followed by every month with data, newest first
pub fn month_options(months: &[YearMonth]) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new(AUTO_MONTH_LABEL, AUTO))
        .chain(
            months
                .iter()
                .map(|m| SelectOption::new(thai_month_label(*m), m.to_string())),
        )
        .collect()
}

/// Requested month when it has data, otherwise the newest month
pub fn resolve_month(param: MonthParam, newest_first: &[YearMonth]) -> Option<YearMonth> {
    match param {
        MonthParam::Month(m) if newest_first.contains(&m) => Some(m),
        _ => newest_first.first().copied(),
    }
}

pub fn build_slide(
    id: i64,
    record: &ForecastRecord,
    slot_iso: &str,
    day_night: DayNight,
    lang: &Language,
) -> Slide {
    Slide {
        id: id.to_string(),
        label: record.region.name_th().to_string(),
        region: record.region,
        main_temp: format_temperature(record.temperature_c),
        desc: record.detail.label(lang).to_string(),
        items: slide_items(record),
        meta: SlideMeta {
            slot_iso: slot_iso.to_string(),
            day_night,
        },
    }
}

fn monthly_card(region: Region, avg: RegionAverages) -> MonthlyCard {
    MonthlyCard {
        region,
        desc: MONTHLY_DESC.to_string(),
        avg_rain_pct: avg.avg_rain_pct,
        avg_min_temp_c: avg.avg_min_temperature_c,
        avg_max_temp_c: avg.avg_max_temperature_c,
        count: avg.count,
    }
}

fn empty_period<C>(month_param: &str, options: Vec<SelectOption>) -> PeriodResponse<C> {
    PeriodResponse {
        options,
        resolved: PeriodResolved {
            month_param: month_param.to_string(),
            month: None,
            start_iso: None,
            end_iso: None,
        },
        cards: Vec::new(),
    }
}

fn period_resolved(
    month_param: &str,
    month: YearMonth,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> PeriodResolved {
    PeriodResolved {
        month_param: month_param.to_string(),
        month: Some(month.to_string()),
        start_iso: Some(iso(start)),
        end_iso: Some(iso(end)),
    }
}

fn to_utc(local: &FixedOffset, at: NaiveDateTime) -> AppResult<DateTime<Utc>> {
    local
        .from_local_datetime(&at)
        .single()
        .map(|t| t.with_timezone(&Utc))
        .ok_or_else(|| AppError::Internal(format!("Unrepresentable local time {}", at)))
}

fn local_midnight(local: &FixedOffset, date: NaiveDate) -> AppResult<DateTime<Utc>> {
    to_utc(local, date.and_time(chrono::NaiveTime::MIN))
}

/// ISO 8601 in UTC with milliseconds, e.g. `2025-11-01T06:00:00.000Z`
pub fn iso(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
