//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps lifecycle errors from devinv-state to HTTP status codes and renders
//! every failure with the same JSON body:
//!
//! ```json
//! {"timestamp": "...", "status": 404, "error": "Device Not Found", "message": "..."}
//! ```
//!
//! Validation failures additionally carry `errors: [{field, message}]`.
//! Internal error details are logged and never returned to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use devinv_core::LifecycleError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// When the error was produced.
    pub timestamp: DateTime<Utc>,
    /// HTTP status code, repeated in the body.
    pub status: u16,
    /// Error category, e.g. "Device Not Found" or "Conflict".
    pub error: String,
    /// Human-readable description.
    pub message: String,
    /// Per-field problems, present only for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// A single invalid request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Unknown device (404).
    #[error("{0}")]
    NotFound(String),

    /// A field value was rejected by the lifecycle engine, or a path
    /// parameter could not be parsed (400).
    #[error("{0}")]
    BadRequest(String),

    /// The request conflicts with the device's current state (409).
    #[error("{0}")]
    Conflict(String),

    /// The body is not valid JSON or has a value of the wrong type (400).
    #[error("{0}")]
    InvalidBody(String),

    /// Required fields are missing or blank (400).
    #[error("request validation failed")]
    Validation(Vec<FieldError>),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and error category for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "Device Not Found"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "Bad Request"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "Conflict"),
            Self::InvalidBody(_) => (StatusCode::BAD_REQUEST, "Invalid request body"),
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "Validation failed"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        }
    }

    fn into_body(self) -> ErrorBody {
        let (status, code) = self.status_and_code();
        let (message, errors) = match self {
            Self::Internal(_) => ("An internal error occurred".to_string(), None),
            Self::Validation(fields) => {
                let summary = fields
                    .iter()
                    .map(|f| format!("{}: {}", f.field, f.message))
                    .collect::<Vec<_>>()
                    .join("; ");
                (summary, Some(fields))
            }
            Self::NotFound(m)
            | Self::BadRequest(m)
            | Self::Conflict(m)
            | Self::InvalidBody(m) => (m, None),
        };

        ErrorBody {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: code.to_string(),
            message,
            errors,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _) = self.status_and_code();

        if let Self::Internal(detail) = &self {
            tracing::error!(error = %detail, "internal server error");
        }

        (status, Json(self.into_body())).into_response()
    }
}

impl From<LifecycleError> for AppError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::NotFound(_) => Self::NotFound(err.to_string()),
            LifecycleError::InvalidArgument { message, .. } => Self::BadRequest(message),
            LifecycleError::IllegalState(message) | LifecycleError::IllegalOperation(message) => {
                Self::Conflict(message)
            }
            LifecycleError::Storage(inner) => Self::Internal(inner.to_string()),
        }
    }
}
