//! Thai labels and slide formatting for the dashboard

use chrono::{Datelike, NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::fields::FIELDS_PER_REGION;
use crate::models::{FieldKey, ForecastRecord};
use crate::period::YearMonth;

const BUDDHIST_ERA_OFFSET: i32 = 543;

const THAI_MONTHS_SHORT: [&str; 12] = [
    "ม.ค.", "ก.พ.", "มี.ค.", "เม.ย.", "พ.ค.", "มิ.ย.", "ก.ค.", "ส.ค.", "ก.ย.", "ต.ค.", "พ.ย.", "ธ.ค.",
];

const THAI_MONTHS_LONG: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

/// Short Thai label such as `01 พ.ย. 2568 13:00`
pub fn thai_date_time_label(local: NaiveDateTime) -> String {
    format!(
        "{:02} {} {} {:02}:{:02}",
        local.day(),
        THAI_MONTHS_SHORT[local.month0() as usize],
        local.year() + BUDDHIST_ERA_OFFSET,
        local.hour(),
        local.minute()
    )
}

/// Long Thai month label such as `พฤศจิกายน 2568`
pub fn thai_month_label(month: YearMonth) -> String {
    format!(
        "{} {}",
        THAI_MONTHS_LONG[(month.month() - 1) as usize],
        month.year() + BUDDHIST_ERA_OFFSET
    )
}

/// Temperature with trailing zeros dropped: `31.0` renders `31°`
pub fn format_temperature(value: Decimal) -> String {
    format!("{}°", value.normalize())
}

/// One labelled value on a daily slide
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideItem {
    pub key: FieldKey,
    pub value: String,
}

/// Display items of a record in canonical field order, at most six
pub fn slide_items(record: &ForecastRecord) -> Vec<SlideItem> {
    FieldKey::ALL
        .into_iter()
        .filter_map(|key| {
            item_value(record, key).map(|value| SlideItem { key, value })
        })
        .take(FIELDS_PER_REGION)
        .collect()
}

fn item_value(record: &ForecastRecord, key: FieldKey) -> Option<String> {
    match key {
        FieldKey::MaxTempC => record.max_temperature_c.map(format_temperature),
        FieldKey::MinTempC => record.min_temperature_c.map(format_temperature),
        FieldKey::WindText => record.wind_text.clone(),
        FieldKey::WaveText => record.wave_text.clone(),
        FieldKey::NearbyAreas => record
            .nearby_province_codes
            .as_ref()
            .filter(|codes| !codes.is_empty())
            .map(|codes| format!("{} พื้นที่", codes.len())),
        pct => record.percentage(pct).map(|v| format!("{}%", v)),
    }
}
