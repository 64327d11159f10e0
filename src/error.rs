//! Application error taxonomy and its HTTP mapping.
//!
//! Services and repositories return [`AppError`]; the HTTP boundary turns it
//! into a status code and a JSON body via [`IntoResponse`].

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Why an API key was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DenyReason {
    #[error("Missing or unknown API key")]
    Unauthorized,
    #[error("Daily quota exceeded")]
    QuotaExceeded,
    #[error("API key is disabled")]
    Disabled,
}

impl DenyReason {
    /// Machine-readable reason included in error details.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::QuotaExceeded => "quota_exceeded",
            Self::Disabled => "disabled",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A key could not be decoded with the base58 codec.
    #[error("Invalid key format: {key}")]
    InvalidKeyFormat { key: String },

    /// Malformed request input.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// The wished key is already mapped to a different URL.
    #[error("Key '{key}' is already taken")]
    KeyConflict { key: String },

    #[error("Short link not found: {key}")]
    NotFound { key: String },

    #[error("{reason}")]
    Denied { reason: DenyReason },

    /// Persistence failure. The message is logged, never sent to clients.
    #[error("Storage error: {0}")]
    Store(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: u16,
    #[serde(skip_serializing_if = "Value::is_null")]
    details: Value,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_key(key: impl Into<String>) -> Self {
        Self::InvalidKeyFormat { key: key.into() }
    }

    pub fn key_conflict(key: impl Into<String>) -> Self {
        Self::KeyConflict { key: key.into() }
    }

    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    pub fn denied(reason: DenyReason) -> Self {
        Self::Denied { reason }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// HTTP status for this error kind.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidKeyFormat { .. } | Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::KeyConflict { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Denied {
                reason: DenyReason::QuotaExceeded,
            } => StatusCode::TOO_MANY_REQUESTS,
            Self::Denied { .. } => StatusCode::UNAUTHORIZED,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (error, details) = match self {
            AppError::Store(message) => {
                tracing::error!("Storage failure: {}", message);
                ("Internal server error".to_string(), Value::Null)
            }
            AppError::Validation { message, details } => (message, details),
            AppError::Denied { reason } => (
                reason.to_string(),
                json!({ "reason": reason.as_str() }),
            ),
            AppError::KeyConflict { key } => (
                format!("Key '{}' is already taken", key),
                json!({ "key": key }),
            ),
            other => (other.to_string(), Value::Null),
        };

        let body = ErrorBody {
            error,
            code: status.as_u16(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Store(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request("Invalid request", json!({ "fields": e.to_string() }))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Malformed JSON body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}
