//! Route definitions for the Regional Weather Dashboard

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::session_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Dashboard views, session-gated when configured
        .merge(dashboard_routes(state))
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(handlers::login))
}

/// Dashboard read routes
fn dashboard_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/daily", get(handlers::get_daily))
        .route("/monthly", get(handlers::get_monthly))
        .route("/week", get(handlers::get_weekly))
        .route_layer(middleware::from_fn_with_state(state, session_middleware))
}
