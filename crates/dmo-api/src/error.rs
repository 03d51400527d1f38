//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps domain errors from dmo-state, dmo-classify and dmo-advisor to HTTP
//! status codes with a JSON body `{"error": {"code", "message"}}`.
//! Upstream error details are logged, never returned to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dmo_advisor::AdvisorError;
use dmo_classify::DatasetError;
use dmo_state::WorkflowError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Request body could not be parsed (422).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Operation not allowed in the session's current phase (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Advisory service failed or timed out (502).
    #[error("advisory service failed: {0}")]
    Upstream(String),

    /// Service dependency not configured (503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::UNPROCESSABLE_ENTITY, "BAD_REQUEST"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        }
    }

    /// Construct a session-not-found error (404).
    pub fn session_not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("session {id} not found"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        match &self {
            Self::Upstream(_) => tracing::error!(error = %self, "advisory upstream error"),
            Self::ServiceUnavailable(_) => tracing::warn!(error = %self, "service unavailable"),
            _ => {}
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Phase conflicts are 409; bad keys, bad profiles and empty reviews are 422.
impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        if err.is_phase_conflict() {
            Self::Conflict(err.to_string())
        } else {
            Self::Validation(err.to_string())
        }
    }
}

impl From<DatasetError> for AppError {
    fn from(err: DatasetError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Only a summary reaches the client; response bodies from the completion
/// service stay in the logs.
impl From<AdvisorError> for AppError {
    fn from(err: AdvisorError) -> Self {
        let summary = match &err {
            AdvisorError::Timeout { secs } => format!("timed out after {secs}s"),
            AdvisorError::Upstream { status, .. } => {
                format!("completion service returned status {status}")
            }
            AdvisorError::Http { .. } => "completion service unreachable".to_string(),
            AdvisorError::Deserialization { .. } => {
                "completion service sent a malformed response".to_string()
            }
            AdvisorError::EmptyCompletion => "completion service returned no text".to_string(),
        };
        tracing::warn!(error = %err, "advisory call failed");
        Self::Upstream(summary)
    }
}
