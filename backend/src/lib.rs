//! Regional Weather Dashboard - Backend
//!
//! Serves synthesized regional forecasts for Thailand as daily slides and
//! monthly or weekly averages, with citizen portal login.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod cache;
pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;

pub use crate::config::Config;
use crate::config::LoggingConfig;
use crate::error::AppResult;
use crate::external::{CzpClient, CzpSettings};
use crate::services::{DashboardService, SessionService, SsoService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Arc<Config>,
    pub sessions: SessionService,
    pub sso: SsoService,
    pub dashboard: DashboardService,
}

impl AppState {
    /// Wire services from configuration
    ///
    /// Incomplete citizen portal settings leave login disabled; logins then
    /// fail with a configuration error instead of preventing startup.
    pub fn new(db: sqlx::PgPool, config: Config) -> AppResult<Self> {
        let schedule = config.dashboard.schedule()?;
        let local = config.dashboard.local_offset()?;
        let sessions = SessionService::new(&config.session);

        let czp = match CzpSettings::from_config(&config.czp) {
            Ok(settings) => Some(CzpClient::new(settings)),
            Err(err) => {
                tracing::warn!(error = %err, "Citizen portal login disabled");
                None
            }
        };

        Ok(Self {
            dashboard: DashboardService::new(db.clone(), schedule, local),
            sso: SsoService::new(czp, sessions.clone()),
            sessions,
            config: Arc::new(config),
            db,
        })
    }
}

/// Install the global tracing subscriber
pub fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "weather_dashboard_backend=debug,wxd_server=debug,wxd_seed=info,tower_http=debug,sqlx=warn"
            .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api", routes::api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Regional Weather Dashboard API"
}
