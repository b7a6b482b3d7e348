//! Configuration management for the Regional Weather Dashboard
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with WXD_ prefix

use chrono::{FixedOffset, NaiveDate};
use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{DomainError, SlotSchedule};

use crate::error::{AppError, AppResult};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    pub server: ServerConfig,

    pub database: DatabaseConfig,

    pub logging: LoggingConfig,

    pub dashboard: DashboardConfig,

    pub seed: SeedConfig,

    /// Citizen portal SSO
    pub czp: CzpConfig,

    /// Dashboard session tokens
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `pretty` or `json`
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    /// Hours of the daily forecast slots
    pub slot_hours: Vec<u32>,

    /// Offset of dashboard local time from UTC
    pub utc_offset_hours: i32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedConfig {
    /// First seeded day
    pub start_date: NaiveDate,

    /// Last seeded day (inclusive)
    pub end_date: NaiveDate,

    /// Inserts awaited together
    pub batch_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CzpConfig {
    /// Validate endpoint that issues the intermediate token
    pub auth_url: Option<String>,

    /// Profile decryption endpoint
    pub deproc_url: Option<String>,

    pub consumer_key: Option<String>,

    pub consumer_secret: Option<String>,

    pub agent_id: Option<String>,

    /// Lifetime of a cached intermediate token
    pub token_ttl_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Secret key for signing session tokens
    pub secret: String,

    /// Session token expiration in seconds
    pub expiry_secs: i64,

    /// Require a session token on dashboard endpoints
    pub require_session: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("WXD_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("logging.format", "pretty")?
            .set_default("dashboard.slot_hours", vec![7, 13, 19])?
            .set_default("dashboard.utc_offset_hours", 7)?
            .set_default("seed.start_date", "2025-11-01")?
            .set_default("seed.end_date", "2026-01-01")?
            .set_default("seed.batch_size", 25)?
            .set_default("czp.token_ttl_secs", 300)?
            .set_default("session.secret", "development-session-secret")?
            .set_default("session.expiry_secs", 3600)?
            .set_default("session.require_session", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (WXD_ prefix)
            .add_source(
                Environment::with_prefix("WXD")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("dashboard.slot_hours")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl DashboardConfig {
    /// Validated slot schedule
    pub fn schedule(&self) -> Result<SlotSchedule, DomainError> {
        SlotSchedule::new(self.slot_hours.iter().copied())
    }

    /// Dashboard local time zone
    pub fn local_offset(&self) -> AppResult<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_hours * 3600).ok_or_else(|| {
            AppError::Configuration(format!(
                "utc_offset_hours out of range: {}",
                self.utc_offset_hours
            ))
        })
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            slot_hours: shared::slot::DEFAULT_SLOT_HOURS.to_vec(),
            utc_offset_hours: 7,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dashboard_config() {
        let dashboard = DashboardConfig::default();
        assert_eq!(dashboard.schedule().unwrap().hours(), &[7, 13, 19]);
        assert_eq!(
            dashboard.local_offset().unwrap(),
            FixedOffset::east_opt(7 * 3600).unwrap()
        );
    }

    #[test]
    fn test_bad_offset_is_configuration_error() {
        let dashboard = DashboardConfig {
            utc_offset_hours: 30,
            ..DashboardConfig::default()
        };
        assert!(matches!(
            dashboard.local_offset(),
            Err(AppError::Configuration(_))
        ));
    }
}
