//! Session middleware
//!
//! Validates dashboard session tokens when sessions are required

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{ErrorDetail, ErrorResponse};
use crate::services::SessionClaims;
use crate::AppState;

/// Session middleware for dashboard routes
///
/// When `session.require_session` is off, requests pass through untouched.
/// Otherwise a valid `Bearer` session token is required and its claims are
/// placed in the request extensions.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if !state.config.session.require_session {
        return next.run(request).await;
    }

    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        return unauthorized_response("Missing or invalid Authorization header");
    };

    match state.sessions.validate(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(err) => err.into_response(),
    }
}

/// Create unauthorized response
fn unauthorized_response(message: &str) -> Response {
    let detail = ErrorDetail::new("UNAUTHORIZED", message, "ต้องเข้าสู่ระบบก่อน");
    (StatusCode::UNAUTHORIZED, Json(ErrorResponse { error: detail })).into_response()
}

/// Extractor for the current session, if the middleware validated one
#[derive(Clone, Debug)]
pub struct CurrentSession(pub Option<SessionClaims>);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(CurrentSession(parts.extensions.get::<SessionClaims>().cloned()))
    }
}
