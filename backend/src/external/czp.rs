//! Citizen portal (CZP) SSO client
//!
//! Login is two calls: the validate endpoint trades the consumer secret for
//! an intermediate token (iToken), then the deproc endpoint trades the
//! user's appId and mToken for their profile.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::cache::ExpiringCache;
use crate::config::CzpConfig;
use crate::error::{AppError, AppResult};

/// Deproc `messageCode` that marks success
const DEPROC_SUCCESS_CODE: i64 = 200;

/// Endpoints and credentials, all required
#[derive(Debug, Clone)]
pub struct CzpSettings {
    pub auth_url: String,
    pub deproc_url: String,
    pub consumer_key: String,
    pub consumer_secret: String,
    pub agent_id: String,
    pub token_ttl: Duration,
}

impl CzpSettings {
    /// Fails naming the first missing setting
    pub fn from_config(config: &CzpConfig) -> AppResult<Self> {
        fn required(value: &Option<String>, key: &str) -> AppResult<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or_else(|| AppError::Configuration(format!("missing czp.{}", key)))
        }

        Ok(Self {
            auth_url: required(&config.auth_url, "auth_url")?,
            deproc_url: required(&config.deproc_url, "deproc_url")?,
            consumer_key: required(&config.consumer_key, "consumer_key")?,
            consumer_secret: required(&config.consumer_secret, "consumer_secret")?,
            agent_id: required(&config.agent_id, "agent_id")?,
            token_ttl: Duration::from_secs(config.token_ttl_secs),
        })
    }
}

/// Citizen profile returned by a successful login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CitizenProfile {
    pub user_id: String,
    pub citizen_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth_string: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub notification: Option<bool>,
}

impl CitizenProfile {
    /// Given and family name joined, if any
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }
}

#[derive(Debug, Deserialize)]
struct ValidateResponse {
    #[serde(rename = "Result")]
    result: Option<String>,
}

#[derive(Debug, Serialize)]
struct DeprocRequest<'a> {
    #[serde(rename = "AppId")]
    app_id: &'a str,
    #[serde(rename = "MToken")]
    mtoken: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeprocResponse {
    result: Option<DeprocProfile>,
    message_code: Option<i64>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeprocProfile {
    user_id: Option<String>,
    citizen_id: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    date_of_birth_string: Option<String>,
    mobile: Option<String>,
    email: Option<String>,
    notification: Option<bool>,
}

/// CZP API client
#[derive(Clone)]
pub struct CzpClient {
    client: Client,
    settings: CzpSettings,
    itoken: Arc<ExpiringCache<String>>,
}

impl CzpClient {
    pub fn new(settings: CzpSettings) -> Self {
        Self::with_client(Client::new(), settings)
    }

    pub fn with_client(client: Client, settings: CzpSettings) -> Self {
        let itoken = Arc::new(ExpiringCache::new(settings.token_ttl));
        Self {
            client,
            settings,
            itoken,
        }
    }

    /// Exchange appId and mToken for the citizen's profile
    pub async fn deproc_profile(&self, app_id: &str, mtoken: &str) -> AppResult<CitizenProfile> {
        let itoken = self.intermediate_token().await?;

        let response = self
            .client
            .post(&self.settings.deproc_url)
            .header("Consumer-Key", &self.settings.consumer_key)
            .header("Token", itoken)
            .json(&DeprocRequest { app_id, mtoken })
            .send()
            .await
            .map_err(|e| AppError::SsoService(format!("deproc request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            // Stale iToken; fetch a fresh one on the next login
            self.itoken.invalidate().await;
        }
        let data: Option<DeprocResponse> = response.json().await.ok();
        let rejected = |message: Option<String>| AppError::Unauthorized {
            message: message.unwrap_or_else(|| format!("deproc failed ({})", status.as_u16())),
            message_th: "เข้าสู่ระบบไม่สำเร็จ".to_string(),
        };

        let Some(data) = data else {
            return Err(rejected(None));
        };
        let profile = data.result.and_then(|p| p.user_id.clone().map(|id| (id, p)));
        match profile {
            Some((user_id, p)) if status.is_success() && data.message_code == Some(DEPROC_SUCCESS_CODE) => {
                tracing::info!(status = status.as_u16(), "Citizen profile resolved");
                Ok(CitizenProfile {
                    user_id,
                    citizen_id: p.citizen_id,
                    first_name: p.first_name,
                    last_name: p.last_name,
                    date_of_birth_string: p.date_of_birth_string,
                    mobile: p.mobile,
                    email: p.email,
                    notification: p.notification,
                })
            }
            _ => {
                tracing::warn!(
                    status = status.as_u16(),
                    message_code = ?data.message_code,
                    "Citizen portal rejected login"
                );
                Err(rejected(data.message))
            }
        }
    }

    /// Cached iToken, fetched from the validate endpoint when expired
    async fn intermediate_token(&self) -> AppResult<String> {
        self.itoken.get_or_refresh(|| self.fetch_intermediate_token()).await
    }

    async fn fetch_intermediate_token(&self) -> AppResult<String> {
        tracing::debug!("Requesting citizen portal intermediate token");

        let response = self
            .client
            .get(&self.settings.auth_url)
            .query(&[
                ("ConsumerSecret", self.settings.consumer_secret.as_str()),
                ("AgentID", self.settings.agent_id.as_str()),
            ])
            .header("Consumer-Key", &self.settings.consumer_key)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| AppError::SsoService(format!("validate request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::SsoService(format!(
                "validate failed: {}",
                status.as_u16()
            )));
        }

        let data: ValidateResponse = response
            .json()
            .await
            .map_err(|e| AppError::SsoService(format!("Failed to parse validate response: {}", e)))?;

        data.result
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::SsoService("validate missing Result token".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CzpConfig {
        CzpConfig {
            auth_url: Some("http://czp/validate".into()),
            deproc_url: Some("http://czp/deproc".into()),
            consumer_key: Some("key".into()),
            consumer_secret: Some("secret".into()),
            agent_id: Some("agent".into()),
            token_ttl_secs: 300,
        }
    }

    #[test]
    fn test_settings_require_every_value() {
        assert!(CzpSettings::from_config(&config()).is_ok());

        let mut missing = config();
        missing.agent_id = Some("  ".into());
        match CzpSettings::from_config(&missing) {
            Err(AppError::Configuration(msg)) => assert_eq!(msg, "missing czp.agent_id"),
            other => panic!("unexpected: {:?}", other.map(|s| s.auth_url)),
        }
    }

    #[test]
    fn test_display_name() {
        let mut profile = CitizenProfile {
            user_id: "u1".into(),
            citizen_id: None,
            first_name: Some("สมชาย".into()),
            last_name: Some("ใจดี".into()),
            date_of_birth_string: None,
            mobile: None,
            email: None,
            notification: None,
        };
        assert_eq!(profile.display_name().as_deref(), Some("สมชาย ใจดี"));
        profile.first_name = None;
        profile.last_name = None;
        assert_eq!(profile.display_name(), None);
    }
}
