//! Citizen portal login handler

use axum::{body::Bytes, extract::State, Json};

use crate::error::AppResult;
use crate::services::sso::{LoginInput, LoginResponse};
use crate::AppState;

/// Exchange portal credentials for a citizen profile and a session token
///
/// A missing or unparseable body is treated as empty credentials so the
/// caller gets the validation error rather than a JSON rejection.
pub async fn login(State(state): State<AppState>, body: Bytes) -> AppResult<Json<LoginResponse>> {
    let input: LoginInput = serde_json::from_slice(&body).unwrap_or_default();
    let response = state.sso.login(input).await?;

    tracing::info!(user = %response.data.user_id, "Citizen portal login succeeded");
    Ok(Json(response))
}
