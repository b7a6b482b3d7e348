//! Validation and normalization of dashboard and login input

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::error::DomainError;
use crate::period::YearMonth;
use crate::types::AUTO;

// ============================================================================
// SSO Login Validations
// ============================================================================

/// Trim an application id
pub fn sanitize_app_id(app_id: &str) -> String {
    app_id.trim().to_string()
}

/// Undo form-decoding of `+` into spaces, then trim
pub fn sanitize_mtoken(mtoken: &str) -> String {
    mtoken.replace(' ', "+").trim().to_string()
}

/// Both login values must be present after sanitizing
pub fn validate_sso_credentials(app_id: &str, mtoken: &str) -> Result<(), &'static str> {
    if app_id.is_empty() && mtoken.is_empty() {
        return Err("Missing appId/mToken");
    }
    if app_id.is_empty() {
        return Err("Missing appId");
    }
    if mtoken.is_empty() {
        return Err("Missing mToken");
    }
    Ok(())
}

// ============================================================================
// Dashboard Query Validations
// ============================================================================

/// Parsed `dt` query value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeParam {
    Auto,
    At(DateTime<FixedOffset>),
}

/// Parsed `month` query value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthParam {
    Auto,
    Month(YearMonth),
}

/// Parse `dt`: absent, empty or `AUTO` selects the current time
///
/// Accepts RFC 3339 timestamps, or a naive `YYYY-MM-DDTHH:MM[:SS]` that is
/// read in `local` time. A bare `YYYY-MM-DD` is midnight UTC, as ECMAScript
/// date-only forms are.
pub fn parse_date_time_param(
    raw: Option<&str>,
    local: &FixedOffset,
) -> Result<DateTimeParam, DomainError> {
    let value = match raw.map(str::trim) {
        None | Some("") | Some(AUTO) => return Ok(DateTimeParam::Auto),
        Some(v) => v,
    };

    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(DateTimeParam::At(at));
    }

    if let Ok(day) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let midnight = Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN));
        return Ok(DateTimeParam::At(midnight.fixed_offset()));
    }

    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .and_then(|naive| local.from_local_datetime(&naive).single())
        .map(DateTimeParam::At)
        .ok_or_else(|| DomainError::InvalidValue {
            field: "dt",
            value: value.to_string(),
        })
}

/// Parse `month`: absent, empty or `AUTO` selects the newest month
pub fn parse_month_param(raw: Option<&str>) -> Result<MonthParam, DomainError> {
    match raw.map(str::trim) {
        None | Some("") | Some(AUTO) => Ok(MonthParam::Auto),
        Some(v) => v.parse().map(MonthParam::Month),
    }
}
