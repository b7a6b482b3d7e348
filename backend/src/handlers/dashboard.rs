//! HTTP handlers for the dashboard read endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use shared::{parse_date_time_param, parse_month_param, Language, AUTO};

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentSession;
use crate::services::dashboard::{DailyResponse, MonthlyCard, PeriodResponse, WeeklyCard};
use crate::AppState;

/// Query parameters for the daily view
#[derive(Debug, Deserialize)]
pub struct DailyQuery {
    pub dt: Option<String>,
    pub lang: Option<String>,
}

/// Query parameters for the monthly and weekly views
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

/// Regional forecast slides for one slot
pub async fn get_daily(
    State(state): State<AppState>,
    session: CurrentSession,
    Query(query): Query<DailyQuery>,
) -> AppResult<Json<DailyResponse>> {
    log_viewer(&session, "daily");
    let local = state.config.dashboard.local_offset()?;

    let dt_param = non_empty_or_auto(query.dt.as_deref());
    let dt = parse_date_time_param(Some(dt_param), &local).map_err(|e| {
        AppError::invalid_field("dt", e.to_string(), "รูปแบบวันเวลาไม่ถูกต้อง")
    })?;
    let lang = query
        .lang
        .as_deref()
        .map(Language::from_code)
        .unwrap_or_default();

    let response = state
        .dashboard
        .daily(dt_param, dt, lang, Utc::now())
        .await?;
    Ok(Json(response))
}

/// Monthly averages per region
pub async fn get_monthly(
    State(state): State<AppState>,
    session: CurrentSession,
    Query(query): Query<MonthQuery>,
) -> AppResult<Json<PeriodResponse<MonthlyCard>>> {
    log_viewer(&session, "monthly");
    let month_param = non_empty_or_auto(query.month.as_deref());
    let month = parse_month(month_param)?;

    let response = state.dashboard.monthly(month_param, month).await?;
    Ok(Json(response))
}

/// Week-of-month averages per region
pub async fn get_weekly(
    State(state): State<AppState>,
    session: CurrentSession,
    Query(query): Query<MonthQuery>,
) -> AppResult<Json<PeriodResponse<WeeklyCard>>> {
    log_viewer(&session, "week");
    let month_param = non_empty_or_auto(query.month.as_deref());
    let month = parse_month(month_param)?;

    let response = state.dashboard.weekly(month_param, month).await?;
    Ok(Json(response))
}

fn parse_month(raw: &str) -> AppResult<shared::MonthParam> {
    parse_month_param(Some(raw)).map_err(|e| {
        AppError::invalid_field("month", e.to_string(), "รูปแบบเดือนไม่ถูกต้อง (YYYY-MM)")
    })
}

fn non_empty_or_auto(raw: Option<&str>) -> &str {
    match raw.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => AUTO,
    }
}

fn log_viewer(session: &CurrentSession, view: &str) {
    if let Some(claims) = &session.0 {
        tracing::debug!(user = %claims.sub, view, "Dashboard view requested");
    }
}
