//! Reseeding the forecast tables with synthesized data

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use futures::future::try_join_all;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;

use shared::{ForecastRecord, ForecastSynthesizer, ProvinceSeed, Region, SlotSchedule};

use crate::error::{AppError, AppResult};

/// Seeding window and batching
#[derive(Debug, Clone)]
pub struct SeedPlan {
    pub start_date: NaiveDate,
    /// Inclusive
    pub end_date: NaiveDate,
    pub schedule: SlotSchedule,
    pub local: FixedOffset,
    pub batch_size: usize,
}

/// Counts reported after a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub provinces: usize,
    pub days: usize,
    pub forecasts: usize,
    pub nearby_links: usize,
}

/// Seed service replacing all forecast data
pub struct SeedService {
    db: PgPool,
    synthesizer: ForecastSynthesizer<'static>,
    provinces: &'static [ProvinceSeed],
}

impl SeedService {
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            synthesizer: ForecastSynthesizer::new(),
            provinces: shared::PROVINCES,
        }
    }

    /// Wipe and regenerate provinces and forecasts for the plan's window
    pub async fn run(&self, plan: &SeedPlan) -> AppResult<SeedSummary> {
        if plan.end_date < plan.start_date {
            return Err(AppError::Configuration(format!(
                "seed window ends before it starts: {} > {}",
                plan.start_date, plan.end_date
            )));
        }
        if plan.batch_size == 0 {
            return Err(AppError::Configuration("seed.batch_size must be positive".into()));
        }

        self.clear().await?;
        let province_ids = self.insert_provinces().await?;
        tracing::info!(count = province_ids.len(), "Provinces inserted");

        let records = synthesize_window(&self.synthesizer, plan)?;
        let days = days_inclusive(plan.start_date, plan.end_date);
        tracing::info!(records = records.len(), days, "Forecasts synthesized");

        let mut nearby_links = 0;
        let total_batches = records.len().div_ceil(plan.batch_size);
        for (index, batch) in records.chunks(plan.batch_size).enumerate() {
            let inserted = try_join_all(
                batch
                    .iter()
                    .map(|record| self.insert_forecast(record, &plan.local, &province_ids)),
            )
            .await?;
            nearby_links += inserted.iter().sum::<usize>();

            tracing::debug!(batch = index + 1, total_batches, size = batch.len(), "Batch inserted");
            if (index + 1) % 20 == 0 || index + 1 == total_batches {
                tracing::info!(
                    inserted = (index * plan.batch_size + batch.len()),
                    total = records.len(),
                    "Seeding progress"
                );
            }
        }

        Ok(SeedSummary {
            provinces: province_ids.len(),
            days,
            forecasts: records.len(),
            nearby_links,
        })
    }

    /// Delete links, forecasts, then provinces
    async fn clear(&self) -> AppResult<()> {
        let mut tx = self.db.begin().await?;
        sqlx::query("DELETE FROM weather_nearby_areas")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM weather_forecasts")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM provinces").execute(&mut *tx).await?;
        tx.commit().await?;

        tracing::info!("Existing forecast data cleared");
        Ok(())
    }

    /// Bulk insert the province table, returning ids by code
    async fn insert_provinces(&self) -> AppResult<HashMap<String, i64>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO provinces (code, name_th, name_en) ");
        builder.push_values(self.provinces, |mut row, province| {
            row.push_bind(province.code)
                .push_bind(province.name_th)
                .push_bind(province.name_en);
        });
        builder.push(" RETURNING id, code");

        let rows: Vec<(i64, String)> = builder.build_query_as().fetch_all(&self.db).await?;
        Ok(rows.into_iter().map(|(id, code)| (code, id)).collect())
    }

    /// Insert one forecast and its nearby links; returns the link count
    async fn insert_forecast(
        &self,
        record: &ForecastRecord,
        local: &FixedOffset,
        province_ids: &HashMap<String, i64>,
    ) -> AppResult<usize> {
        let date_time = slot_instant(record, local)?;

        let forecast_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO weather_forecasts (
                region, date_time, day_night, detail, temperature_c,
                clear_pct, partly_cloudy_pct, cloudy_pct, rain_pct, thunderstorm_pct, fog_pct,
                max_temperature_c, min_temperature_c, wind_text, wave_text
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING id
            "#,
        )
        .bind(record.region.name_th())
        .bind(date_time)
        .bind(record.day_night.as_str())
        .bind(record.detail.label_th())
        .bind(record.temperature_c)
        .bind(record.clear_pct)
        .bind(record.partly_cloudy_pct)
        .bind(record.cloudy_pct)
        .bind(record.rain_pct)
        .bind(record.thunderstorm_pct)
        .bind(record.fog_pct)
        .bind(record.max_temperature_c)
        .bind(record.min_temperature_c)
        .bind(record.wind_text.as_deref())
        .bind(record.wave_text.as_deref())
        .fetch_one(&self.db)
        .await?;

        let codes = record.nearby_province_codes.as_deref().unwrap_or_default();
        if codes.is_empty() {
            return Ok(0);
        }

        let ids = codes
            .iter()
            .map(|code| {
                province_ids.get(code).copied().ok_or_else(|| {
                    AppError::Internal(format!("Nearby province {} was not seeded", code))
                })
            })
            .collect::<AppResult<Vec<i64>>>()?;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO weather_nearby_areas (forecast_id, province_id) ");
        builder.push_values(&ids, |mut row, province_id| {
            row.push_bind(forecast_id).push_bind(*province_id);
        });
        builder.build().execute(&self.db).await?;

        Ok(ids.len())
    }
}

/// Every (day, slot, region) record of the window, in that order
pub fn synthesize_window(
    synthesizer: &ForecastSynthesizer<'_>,
    plan: &SeedPlan,
) -> AppResult<Vec<ForecastRecord>> {
    let mut records = Vec::with_capacity(
        days_inclusive(plan.start_date, plan.end_date) * plan.schedule.hours().len() * Region::ALL.len(),
    );
    for date in plan.start_date.iter_days().take_while(|d| *d <= plan.end_date) {
        for &hour in plan.schedule.hours() {
            for region in Region::ALL {
                records.push(synthesizer.synthesize(region, date, hour)?);
            }
        }
    }
    Ok(records)
}

fn days_inclusive(start: NaiveDate, end: NaiveDate) -> usize {
    ((end - start).num_days() + 1).max(0) as usize
}

/// UTC instant of a record's local slot
pub fn slot_instant(record: &ForecastRecord, local: &FixedOffset) -> AppResult<DateTime<Utc>> {
    local
        .from_local_datetime(&record.local_date_time())
        .single()
        .map(|t| t.with_timezone(&Utc))
        .ok_or_else(|| AppError::Internal("Unrepresentable slot time".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(start: (i32, u32, u32), end: (i32, u32, u32)) -> SeedPlan {
        SeedPlan {
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            schedule: SlotSchedule::default(),
            local: FixedOffset::east_opt(7 * 3600).unwrap(),
            batch_size: 25,
        }
    }

    #[test]
    fn test_window_covers_every_day_slot_region() {
        let synth = ForecastSynthesizer::new();
        let records = synthesize_window(&synth, &plan((2025, 11, 1), (2025, 11, 3))).unwrap();
        assert_eq!(records.len(), 3 * 3 * 7);
        assert_eq!(records[0].region, Region::North);
        assert_eq!(records[0].hour, 7);
        assert_eq!(records.last().unwrap().hour, 19);
    }

    #[test]
    fn test_default_window_size() {
        let synth = ForecastSynthesizer::new();
        let records = synthesize_window(&synth, &plan((2025, 11, 1), (2026, 1, 1))).unwrap();
        assert_eq!(records.len(), 62 * 3 * 7);
        let start = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
        assert_eq!(days_inclusive(start, start), 1);
        assert_eq!(days_inclusive(start, start.pred_opt().unwrap()), 0);
    }

    #[test]
    fn test_slot_instant_is_utc() {
        let synth = ForecastSynthesizer::new();
        let record = synth
            .synthesize(Region::Central, NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(), 7)
            .unwrap();
        let at = slot_instant(&record, &FixedOffset::east_opt(7 * 3600).unwrap()).unwrap();
        assert_eq!(at.to_rfc3339(), "2025-11-01T00:00:00+00:00");
    }
}
