//! Liveness and database connectivity

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
    /// Stored forecast rows; absent when the database is unreachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_rows: Option<i64>,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let rows = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM weather_forecasts")
        .fetch_one(&state.db)
        .await;

    let (status, database, forecast_rows) = match rows {
        Ok(count) => ("ok", "connected", Some(count)),
        Err(err) => {
            tracing::warn!(error = %err, "Database health probe failed");
            ("degraded", "disconnected", None)
        }
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database,
        forecast_rows,
    })
}
