//! Deterministic forecast synthesis
//!
//! Every value of a record comes from one RNG stream keyed by
//! `data:<region>:<YYYY-MM-DD>:<hour>`. Draws happen in a fixed order, so
//! reordering any step changes every value after it.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::DomainError;
use crate::fields::{RegionFieldCache, REGION_FIELDS};
use crate::models::{
    DayNight, FieldKey, ForecastRecord, ProvinceSeed, Region, SkyDetail, PROVINCES,
};
use crate::rng::{round1, round_half_up, SeededRng};

/// Upper bound on province draws when collecting nearby areas
pub const MAX_NEARBY_DRAWS: usize = 64;

/// Largest number of nearby areas attached to one forecast
pub const MAX_NEARBY_AREAS: usize = 2;

const WIND_DIRECTIONS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Builds forecast records from region profiles and the province table
#[derive(Clone, Copy)]
pub struct ForecastSynthesizer<'a> {
    provinces: &'a [ProvinceSeed],
    fields: &'a RegionFieldCache,
}

impl ForecastSynthesizer<'static> {
    /// Synthesizer over the built-in province table and shared field cache
    pub fn new() -> Self {
        Self {
            provinces: PROVINCES,
            fields: &REGION_FIELDS,
        }
    }
}

impl Default for ForecastSynthesizer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ForecastSynthesizer<'a> {
    pub fn with_tables(provinces: &'a [ProvinceSeed], fields: &'a RegionFieldCache) -> Self {
        Self { provinces, fields }
    }

    /// Synthesize the forecast for `region` on `date` at slot `hour`
    pub fn synthesize(
        &self,
        region: Region,
        date: NaiveDate,
        hour: u32,
    ) -> Result<ForecastRecord, DomainError> {
        if hour > 23 {
            return Err(DomainError::InvalidSlotHour(hour));
        }

        let seed_key = format!("data:{}:{}:{}", region.name_th(), date.format("%Y-%m-%d"), hour);
        let mut rng = SeededRng::from_key(&seed_key);

        let profile = region.profile();
        let day_night = DayNight::from_hour(hour);

        let temperature =
            round1(profile.base_temperature_c + hour_adjustment(hour) + rng.centered(2.0));

        let rain = clamp_pct(profile.rain_bias * 100.0 + rng.centered(20.0));
        let thunderstorm = clamp_pct(f64::from(rain) * 0.25 + rng.centered(10.0));
        let night_fog = if day_night == DayNight::Night { 10.0 } else { 0.0 };
        let fog = clamp_pct(rng.next_f64() * 20.0 + night_fog);

        let cloudy = clamp_pct(f64::from(rain) * 0.7 + rng.centered(15.0));
        let partly_cloudy = clamp_pct(f64::from(100 - cloudy) * 0.5 + rng.centered(10.0));
        let clear = (100 - cloudy - partly_cloudy).clamp(0, 100);

        let max_temperature = round1(temperature + 2.0 + rng.next_f64() * 3.0);
        let min_temperature = round1(temperature - (2.0 + rng.next_f64() * 3.0));

        let detail = SkyDetail::classify(rain, cloudy, clear);

        let allowed = self.fields.get(region);
        let shown = |key: FieldKey, value: i32| allowed.contains(key).then_some(value);

        let wind_text = if allowed.contains(FieldKey::WindText) {
            Some(format_wind(&mut rng))
        } else {
            None
        };
        let wave_text = if allowed.contains(FieldKey::WaveText) {
            Some(format_wave(&mut rng))
        } else {
            None
        };
        let nearby_province_codes = if allowed.contains(FieldKey::NearbyAreas) {
            Some(self.pick_nearby(&mut rng)?)
        } else {
            None
        };

        Ok(ForecastRecord {
            region,
            date,
            hour,
            day_night,
            detail,
            temperature_c: tenths(temperature),
            clear_pct: shown(FieldKey::ClearPct, clear),
            partly_cloudy_pct: shown(FieldKey::PartlyCloudyPct, partly_cloudy),
            cloudy_pct: shown(FieldKey::CloudyPct, cloudy),
            rain_pct: shown(FieldKey::RainPct, rain),
            thunderstorm_pct: shown(FieldKey::ThunderstormPct, thunderstorm),
            fog_pct: shown(FieldKey::FogPct, fog),
            max_temperature_c: allowed
                .contains(FieldKey::MaxTempC)
                .then(|| tenths(max_temperature)),
            min_temperature_c: allowed
                .contains(FieldKey::MinTempC)
                .then(|| tenths(min_temperature)),
            wind_text,
            wave_text,
            nearby_province_codes,
        })
    }

    /// Draw 0-2 distinct province codes
    fn pick_nearby(&self, rng: &mut SeededRng) -> Result<Vec<String>, DomainError> {
        let count = rng.index(MAX_NEARBY_AREAS + 1);
        if count == 0 {
            return Ok(Vec::new());
        }
        if self.provinces.is_empty() {
            return Err(DomainError::EmptyProvinceTable);
        }

        let wanted = count.min(self.provinces.len());
        let mut picked: Vec<String> = Vec::with_capacity(wanted);
        for _ in 0..MAX_NEARBY_DRAWS {
            if picked.len() == wanted {
                break;
            }
            let code = self.provinces[rng.index(self.provinces.len())].code;
            if !picked.iter().any(|c| c == code) {
                picked.push(code.to_string());
            }
        }
        Ok(picked)
    }
}

/// Temperature offset for the morning and midday slots
fn hour_adjustment(hour: u32) -> f64 {
    match hour {
        7 => -2.0,
        13 => 1.0,
        _ => 0.0,
    }
}

fn clamp_pct(value: f64) -> i32 {
    (round_half_up(value) as i32).clamp(0, 100)
}

/// One-decimal value as an exact decimal
fn tenths(value: f64) -> Decimal {
    Decimal::new(round_half_up(value * 10.0) as i64, 1)
}

fn format_wind(rng: &mut SeededRng) -> String {
    let speed = round_half_up(3.0 + rng.next_f64() * 27.0) as i64;
    let direction = WIND_DIRECTIONS[rng.index(WIND_DIRECTIONS.len())];
    format!("{} km/h {}", speed, direction)
}

fn format_wave(rng: &mut SeededRng) -> String {
    let height = round1(0.2 + rng.next_f64() * 2.3);
    format!("{} m", height)
}
