//! Error handling for the Regional Weather Dashboard
//!
//! Provides consistent error responses in Thai and English

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::DomainError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Unauthorized: {message}")]
    Unauthorized {
        message: String,
        message_th: String,
    },

    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_th: String,
    },

    // External service errors
    #[error("SSO service error: {0}")]
    SsoService(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Forecast data error: {0}")]
    Domain(#[from] DomainError),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Validation failure on a named query or body field
    pub fn invalid_field(field: &str, message: impl Into<String>, message_th: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.into(),
            message_th: message_th.into(),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_th: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorDetail {
    pub fn new(code: &str, message_en: impl Into<String>, message_th: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message_en: message_en.into(),
            message_th: message_th.into(),
            field: None,
        }
    }
}

impl AppError {
    /// HTTP status and bilingual body for this error
    fn status_and_detail(&self) -> (StatusCode, ErrorDetail) {
        use StatusCode as S;
        match self {
            AppError::TokenExpired => (
                S::UNAUTHORIZED,
                ErrorDetail::new("TOKEN_EXPIRED", "Session has expired", "เซสชันหมดอายุแล้ว"),
            ),
            AppError::InvalidToken => (
                S::UNAUTHORIZED,
                ErrorDetail::new("INVALID_TOKEN", "Invalid token", "โทเค็นไม่ถูกต้อง"),
            ),
            AppError::Unauthorized { message, message_th } => (
                S::UNAUTHORIZED,
                ErrorDetail::new("UNAUTHORIZED", message.as_str(), message_th.as_str()),
            ),
            AppError::Validation { field, message, message_th } => {
                let mut detail =
                    ErrorDetail::new("VALIDATION_ERROR", message.as_str(), message_th.as_str());
                detail.field = Some(field.clone());
                (S::BAD_REQUEST, detail)
            }
            AppError::SsoService(msg) => (
                S::BAD_GATEWAY,
                ErrorDetail::new(
                    "SSO_SERVICE_ERROR",
                    format!("Citizen portal error: {}", msg),
                    format!("เกิดข้อผิดพลาดกับระบบยืนยันตัวตน: {}", msg),
                ),
            ),
            AppError::Configuration(msg) => (
                S::INTERNAL_SERVER_ERROR,
                ErrorDetail::new(
                    "CONFIGURATION_ERROR",
                    format!("Configuration error: {}", msg),
                    format!("เกิดข้อผิดพลาดในการตั้งค่า: {}", msg),
                ),
            ),
            AppError::Domain(err) => (
                S::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("FORECAST_DATA_ERROR", err.to_string(), "ข้อมูลพยากรณ์อากาศไม่ถูกต้อง"),
            ),
            // Driver details stay in the log
            AppError::DatabaseError(_) => (
                S::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("DATABASE_ERROR", "A database error occurred", "เกิดข้อผิดพลาดกับฐานข้อมูล"),
            ),
            AppError::Internal(msg) => (
                S::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("INTERNAL_ERROR", msg.as_str(), "เกิดข้อผิดพลาดภายในเซิร์ฟเวอร์"),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        if status.is_server_error() {
            tracing::error!(code = %detail.code, error = ?self, "Request failed");
        } else {
            tracing::warn!(code = %detail.code, error = %self, "Request rejected");
        }

        (status, Json(ErrorResponse { error: detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
