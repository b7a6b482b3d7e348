//! Citizen portal login

use serde::{Deserialize, Serialize};

use shared::{sanitize_app_id, sanitize_mtoken, validate_sso_credentials};

use crate::error::{AppError, AppResult};
use crate::external::{CitizenProfile, CzpClient};
use crate::services::session::{SessionService, SessionToken};

/// Login request body
#[derive(Debug, Default, Deserialize)]
pub struct LoginInput {
    #[serde(rename = "appId")]
    pub app_id: Option<String>,
    #[serde(rename = "mToken")]
    pub mtoken: Option<String>,
}

/// Successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
    pub data: CitizenProfile,
    pub session: SessionToken,
}

/// SSO service for citizen portal login
#[derive(Clone)]
pub struct SsoService {
    czp: Option<CzpClient>,
    sessions: SessionService,
}

impl SsoService {
    /// `czp` is `None` when the portal settings are incomplete
    pub fn new(czp: Option<CzpClient>, sessions: SessionService) -> Self {
        Self { czp, sessions }
    }

    /// Sanitize credentials, resolve the profile and open a session
    pub async fn login(&self, input: LoginInput) -> AppResult<LoginResponse> {
        let app_id = sanitize_app_id(input.app_id.as_deref().unwrap_or_default());
        let mtoken = sanitize_mtoken(input.mtoken.as_deref().unwrap_or_default());

        validate_sso_credentials(&app_id, &mtoken).map_err(|msg| AppError::Validation {
            field: if app_id.is_empty() { "appId" } else { "mToken" }.to_string(),
            message: msg.to_string(),
            message_th: "กรุณาระบุ appId และ mToken".to_string(),
        })?;

        let czp = self.czp.as_ref().ok_or_else(|| {
            AppError::Configuration("citizen portal login is not configured".to_string())
        })?;

        tracing::info!(
            app_id_len = app_id.len(),
            mtoken_len = mtoken.len(),
            "Citizen portal login attempt"
        );

        let profile = czp
            .deproc_profile(&app_id, &mtoken)
            .await
            .map_err(login_failure)?;
        let session = self.sessions.issue(&profile.user_id, profile.display_name())?;

        Ok(LoginResponse {
            status: "success",
            data: profile,
            session,
        })
    }
}

/// Upstream portal failures surface to the caller as a failed login
fn login_failure(err: AppError) -> AppError {
    match err {
        AppError::SsoService(reason) => {
            tracing::warn!(reason = %reason, "Citizen portal unavailable during login");
            AppError::Unauthorized {
                message: "Login failed".to_string(),
                message_th: "เข้าสู่ระบบไม่สำเร็จ".to_string(),
            }
        }
        other => other,
    }
}
