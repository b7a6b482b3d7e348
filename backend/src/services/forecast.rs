//! Forecast storage queries

use chrono::{DateTime, FixedOffset, Timelike, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use std::collections::BTreeSet;

use shared::{DayNight, ForecastRecord, PeriodSample, YearMonth};

use crate::error::AppResult;

/// Forecast service for reading stored forecasts
#[derive(Clone)]
pub struct ForecastService {
    db: PgPool,
}

/// Stored forecast joined with its nearby province codes
#[derive(Debug, Clone, FromRow)]
pub struct StoredForecast {
    pub id: i64,
    pub region: String,
    pub date_time: DateTime<Utc>,
    pub day_night: String,
    pub detail: String,
    pub temperature_c: Decimal,
    pub clear_pct: Option<i32>,
    pub partly_cloudy_pct: Option<i32>,
    pub cloudy_pct: Option<i32>,
    pub rain_pct: Option<i32>,
    pub thunderstorm_pct: Option<i32>,
    pub fog_pct: Option<i32>,
    pub max_temperature_c: Option<Decimal>,
    pub min_temperature_c: Option<Decimal>,
    pub wind_text: Option<String>,
    pub wave_text: Option<String>,
    pub nearby_codes: Vec<String>,
}

impl StoredForecast {
    /// Rebuild the domain record in dashboard local time
    pub fn into_record(self, local: &FixedOffset) -> AppResult<ForecastRecord> {
        let at = self.date_time.with_timezone(local).naive_local();
        Ok(ForecastRecord {
            region: self.region.parse()?,
            date: at.date(),
            hour: at.hour(),
            day_night: self.day_night.parse()?,
            detail: self.detail.parse()?,
            temperature_c: self.temperature_c,
            clear_pct: self.clear_pct,
            partly_cloudy_pct: self.partly_cloudy_pct,
            cloudy_pct: self.cloudy_pct,
            rain_pct: self.rain_pct,
            thunderstorm_pct: self.thunderstorm_pct,
            fog_pct: self.fog_pct,
            max_temperature_c: self.max_temperature_c,
            min_temperature_c: self.min_temperature_c,
            wind_text: self.wind_text,
            wave_text: self.wave_text,
            nearby_province_codes: (!self.nearby_codes.is_empty()).then_some(self.nearby_codes),
        })
    }
}

/// Columns feeding the period averages
#[derive(Debug, Clone, FromRow)]
pub struct PeriodSampleRow {
    pub region: String,
    pub date_time: DateTime<Utc>,
    pub rain_pct: Option<i32>,
    pub min_temperature_c: Option<Decimal>,
    pub max_temperature_c: Option<Decimal>,
}

impl PeriodSampleRow {
    pub fn into_sample(self, local: &FixedOffset) -> AppResult<PeriodSample> {
        Ok(PeriodSample {
            region: self.region.parse()?,
            date: self.date_time.with_timezone(local).date_naive(),
            rain_pct: self.rain_pct,
            min_temperature_c: self.min_temperature_c,
            max_temperature_c: self.max_temperature_c,
        })
    }
}

impl ForecastService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Every stored slot time, oldest first
    pub async fn distinct_date_times(&self) -> AppResult<Vec<DateTime<Utc>>> {
        let times = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            SELECT DISTINCT date_time
            FROM weather_forecasts
            ORDER BY date_time ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(times)
    }

    /// Months with stored forecasts in local time, newest first
    pub async fn available_months(&self, local: &FixedOffset) -> AppResult<Vec<YearMonth>> {
        let times = self.distinct_date_times().await?;
        Ok(months_newest_first(&times, local))
    }

    /// Forecasts of one slot, ordered by region name
    pub async fn forecasts_at(
        &self,
        slot: DateTime<Utc>,
        day_night: DayNight,
    ) -> AppResult<Vec<StoredForecast>> {
        let rows = sqlx::query_as::<_, StoredForecast>(
            r#"
            SELECT
                f.id, f.region, f.date_time, f.day_night, f.detail, f.temperature_c,
                f.clear_pct, f.partly_cloudy_pct, f.cloudy_pct, f.rain_pct,
                f.thunderstorm_pct, f.fog_pct, f.max_temperature_c, f.min_temperature_c,
                f.wind_text, f.wave_text,
                COALESCE(
                    ARRAY_AGG(p.code ORDER BY p.code) FILTER (WHERE p.code IS NOT NULL),
                    ARRAY[]::VARCHAR[]
                ) AS nearby_codes
            FROM weather_forecasts f
            LEFT JOIN weather_nearby_areas n ON n.forecast_id = f.id
            LEFT JOIN provinces p ON p.id = n.province_id
            WHERE f.date_time = $1 AND f.day_night = $2
            GROUP BY f.id
            ORDER BY f.region ASC
            "#,
        )
        .bind(slot)
        .bind(day_night.as_str())
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Aggregation inputs in `[start, end)`
    pub async fn period_samples(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<PeriodSampleRow>> {
        let rows = sqlx::query_as::<_, PeriodSampleRow>(
            r#"
            SELECT region, date_time, rain_pct, min_temperature_c, max_temperature_c
            FROM weather_forecasts
            WHERE date_time >= $1 AND date_time < $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }
}

/// Distinct local months of `times`, newest first
pub fn months_newest_first(times: &[DateTime<Utc>], local: &FixedOffset) -> Vec<YearMonth> {
    let months: BTreeSet<YearMonth> = times
        .iter()
        .map(|t| YearMonth::from_date(t.with_timezone(local).date_naive()))
        .collect();
    months.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bangkok() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    #[test]
    fn test_months_use_local_time() {
        // 2025-11-30T19:00Z is already December in Bangkok
        let times = vec![
            Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 11, 30, 19, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 11, 2, 6, 0, 0).unwrap(),
        ];
        let months: Vec<String> = months_newest_first(&times, &bangkok())
            .iter()
            .map(|m| m.to_string())
            .collect();
        assert_eq!(months, vec!["2025-12", "2025-11"]);
    }

    #[test]
    fn test_stored_row_to_record() {
        let row = StoredForecast {
            id: 1,
            region: "ภาคกลาง".into(),
            date_time: Utc.with_ymd_and_hms(2025, 11, 1, 6, 0, 0).unwrap(),
            day_night: "Day".into(),
            detail: "เมฆมาก".into(),
            temperature_c: Decimal::new(305, 1),
            clear_pct: Some(10),
            partly_cloudy_pct: None,
            cloudy_pct: None,
            rain_pct: None,
            thunderstorm_pct: None,
            fog_pct: None,
            max_temperature_c: None,
            min_temperature_c: None,
            wind_text: None,
            wave_text: Some("1.2 m".into()),
            nearby_codes: vec![],
        };
        let record = row.into_record(&bangkok()).unwrap();
        assert_eq!(record.region, shared::Region::Central);
        assert_eq!(record.hour, 13);
        assert_eq!(record.nearby_province_codes, None);
    }

    #[test]
    fn test_unknown_region_is_an_error() {
        let row = PeriodSampleRow {
            region: "nowhere".into(),
            date_time: Utc::now(),
            rain_pct: None,
            min_temperature_c: None,
            max_temperature_c: None,
        };
        assert!(row.into_sample(&bangkok()).is_err());
    }
}
