//! Forecast records and their field vocabulary

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::models::Region;
use crate::types::Language;

/// First hour (inclusive) classified as day
pub const DAY_START_HOUR: u32 = 6;
/// First hour (inclusive) classified as night
pub const NIGHT_START_HOUR: u32 = 18;

/// Coarse classification of a slot hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayNight {
    Day,
    Night,
}

impl DayNight {
    /// `Day` for hours in `[6, 18)`, otherwise `Night`
    pub fn from_hour(hour: u32) -> Self {
        if (DAY_START_HOUR..NIGHT_START_HOUR).contains(&hour) {
            DayNight::Day
        } else {
            DayNight::Night
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayNight::Day => "Day",
            DayNight::Night => "Night",
        }
    }
}

impl fmt::Display for DayNight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayNight {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Day" => Ok(DayNight::Day),
            "Night" => Ok(DayNight::Night),
            other => Err(DomainError::InvalidValue {
                field: "day_night",
                value: other.to_string(),
            }),
        }
    }
}

/// Optional forecast attributes a region may display
///
/// Declaration order is the canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKey {
    ClearPct,
    PartlyCloudyPct,
    CloudyPct,
    RainPct,
    ThunderstormPct,
    FogPct,
    MaxTempC,
    MinTempC,
    WindText,
    WaveText,
    NearbyAreas,
}

impl FieldKey {
    pub const ALL: [FieldKey; 11] = [
        FieldKey::ClearPct,
        FieldKey::PartlyCloudyPct,
        FieldKey::CloudyPct,
        FieldKey::RainPct,
        FieldKey::ThunderstormPct,
        FieldKey::FogPct,
        FieldKey::MaxTempC,
        FieldKey::MinTempC,
        FieldKey::WindText,
        FieldKey::WaveText,
        FieldKey::NearbyAreas,
    ];

    /// Keys describing sky conditions; every region shows at least one
    pub const WEATHER_CONDITIONS: [FieldKey; 4] = [
        FieldKey::RainPct,
        FieldKey::CloudyPct,
        FieldKey::ClearPct,
        FieldKey::PartlyCloudyPct,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::ClearPct => "clearPct",
            FieldKey::PartlyCloudyPct => "partlyCloudyPct",
            FieldKey::CloudyPct => "cloudyPct",
            FieldKey::RainPct => "rainPct",
            FieldKey::ThunderstormPct => "thunderstormPct",
            FieldKey::FogPct => "fogPct",
            FieldKey::MaxTempC => "maxTempC",
            FieldKey::MinTempC => "minTempC",
            FieldKey::WindText => "windText",
            FieldKey::WaveText => "waveText",
            FieldKey::NearbyAreas => "nearbyAreas",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Short sky description chosen from rain/cloud/clear thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkyDetail {
    WidespreadRain,
    ScatteredRain,
    Overcast,
    ClearSkies,
    SunAndCloud,
}

impl SkyDetail {
    const ALL: [SkyDetail; 5] = [
        SkyDetail::WidespreadRain,
        SkyDetail::ScatteredRain,
        SkyDetail::Overcast,
        SkyDetail::ClearSkies,
        SkyDetail::SunAndCloud,
    ];

    /// Descending-priority decision table
    pub fn classify(rain_pct: i32, cloudy_pct: i32, clear_pct: i32) -> Self {
        if rain_pct >= 60 {
            SkyDetail::WidespreadRain
        } else if rain_pct >= 35 {
            SkyDetail::ScatteredRain
        } else if cloudy_pct >= 60 {
            SkyDetail::Overcast
        } else if clear_pct >= 60 {
            SkyDetail::ClearSkies
        } else {
            SkyDetail::SunAndCloud
        }
    }

    /// Persisted label
    pub fn label_th(&self) -> &'static str {
        match self {
            SkyDetail::WidespreadRain => "มีฝนในหลายพื้นที่",
            SkyDetail::ScatteredRain => "มีฝนกระจาย",
            SkyDetail::Overcast => "เมฆมาก",
            SkyDetail::ClearSkies => "ท้องฟ้าแจ่มใส",
            SkyDetail::SunAndCloud => "แดดสลับเมฆ",
        }
    }

    pub fn label_en(&self) -> &'static str {
        match self {
            SkyDetail::WidespreadRain => "widespread rain",
            SkyDetail::ScatteredRain => "scattered rain",
            SkyDetail::Overcast => "overcast",
            SkyDetail::ClearSkies => "clear skies",
            SkyDetail::SunAndCloud => "sun and cloud mix",
        }
    }

    pub fn label(&self, language: &Language) -> &'static str {
        match language {
            Language::Thai => self.label_th(),
            Language::English => self.label_en(),
        }
    }
}

impl FromStr for SkyDetail {
    type Err = DomainError;

    /// Parses either label language
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkyDetail::ALL
            .into_iter()
            .find(|d| d.label_th() == s || d.label_en() == s)
            .ok_or_else(|| DomainError::InvalidValue {
                field: "detail",
                value: s.to_string(),
            })
    }
}

impl Serialize for SkyDetail {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label_th())
    }
}

/// One synthesized (or stored) regional forecast at a slot
///
/// Optional fields are `None` when the region's field set excludes them.
/// `nearby_province_codes` is `Some(vec![])` when nearby areas are shown
/// but none were drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRecord {
    pub region: Region,
    pub date: NaiveDate,
    pub hour: u32,
    pub day_night: DayNight,
    pub detail: SkyDetail,
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
    pub nearby_province_codes: Option<Vec<String>>,
}

impl ForecastRecord {
    /// Local date and slot time of this record
    pub fn local_date_time(&self) -> NaiveDateTime {
        let time = NaiveTime::from_hms_opt(self.hour, 0, 0).unwrap_or(NaiveTime::MIN);
        self.date.and_time(time)
    }

    /// Percentage value for a sky-condition key
    pub fn percentage(&self, key: FieldKey) -> Option<i32> {
        match key {
            FieldKey::ClearPct => self.clear_pct,
            FieldKey::PartlyCloudyPct => self.partly_cloudy_pct,
            FieldKey::CloudyPct => self.cloudy_pct,
            FieldKey::RainPct => self.rain_pct,
            FieldKey::ThunderstormPct => self.thunderstorm_pct,
            FieldKey::FogPct => self.fog_pct,
            _ => None,
        }
    }

    /// Whether the given optional field carries a value
    pub fn has_field(&self, key: FieldKey) -> bool {
        match key {
            FieldKey::MaxTempC => self.max_temperature_c.is_some(),
            FieldKey::MinTempC => self.min_temperature_c.is_some(),
            FieldKey::WindText => self.wind_text.is_some(),
            FieldKey::WaveText => self.wave_text.is_some(),
            FieldKey::NearbyAreas => self.nearby_province_codes.is_some(),
            pct => self.percentage(pct).is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_night_boundaries() {
        assert_eq!(DayNight::from_hour(5), DayNight::Night);
        assert_eq!(DayNight::from_hour(6), DayNight::Day);
        assert_eq!(DayNight::from_hour(13), DayNight::Day);
        assert_eq!(DayNight::from_hour(17), DayNight::Day);
        assert_eq!(DayNight::from_hour(18), DayNight::Night);
        assert_eq!(DayNight::from_hour(19), DayNight::Night);
    }

    #[test]
    fn test_detail_priority() {
        assert_eq!(SkyDetail::classify(60, 90, 0), SkyDetail::WidespreadRain);
        assert_eq!(SkyDetail::classify(35, 90, 0), SkyDetail::ScatteredRain);
        assert_eq!(SkyDetail::classify(34, 60, 0), SkyDetail::Overcast);
        assert_eq!(SkyDetail::classify(10, 20, 60), SkyDetail::ClearSkies);
        assert_eq!(SkyDetail::classify(10, 40, 30), SkyDetail::SunAndCloud);
    }

    #[test]
    fn test_detail_parses_both_languages() {
        assert_eq!("เมฆมาก".parse::<SkyDetail>().unwrap(), SkyDetail::Overcast);
        assert_eq!("clear skies".parse::<SkyDetail>().unwrap(), SkyDetail::ClearSkies);
        assert!("foggy".parse::<SkyDetail>().is_err());
    }

    #[test]
    fn test_field_keys_in_canonical_order() {
        let mut sorted = FieldKey::ALL;
        sorted.sort();
        assert_eq!(sorted, FieldKey::ALL);
        assert_eq!(FieldKey::NearbyAreas.as_str(), "nearbyAreas");
    }
}
