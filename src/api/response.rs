//! Response types for the Attendance Engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn new(status: StatusCode, code: &str, error: &EngineError, details: &str) -> Self {
        Self {
            status,
            error: ApiError::with_details(code, error.to_string(), details),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match &error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIG_ERROR",
                    &error,
                    "The engine configuration could not be loaded",
                )
            }
            EngineError::InvalidSession { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                "INVALID_SESSION",
                &error,
                "The session data contains invalid information",
            ),
            EngineError::InvalidTime { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                "INVALID_TIME",
                &error,
                "Times must be zero-padded 24-hour HH:mm",
            ),
            EngineError::InvalidCommitment { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                "INVALID_COMMITMENT",
                &error,
                "Daily commitments must be between 0 and 24 hours",
            ),
            EngineError::SessionAlreadyOpen { .. } => ApiErrorResponse::new(
                StatusCode::CONFLICT,
                "SESSION_ALREADY_OPEN",
                &error,
                "Check out of the open session first",
            ),
            EngineError::NoOpenSession { .. } => ApiErrorResponse::new(
                StatusCode::CONFLICT,
                "NO_OPEN_SESSION",
                &error,
                "Check in before checking out",
            ),
            EngineError::SessionConflict { .. } => ApiErrorResponse::new(
                StatusCode::CONFLICT,
                "SESSION_CONFLICT",
                &error,
                "Sessions on the same date must not overlap",
            ),
            EngineError::SessionNotFound { .. } => ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                "SESSION_NOT_FOUND",
                &error,
                "No session exists with this ID",
            ),
            EngineError::EditWindowExceeded { .. } => ApiErrorResponse::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "EDIT_WINDOW_EXCEEDED",
                &error,
                "The entry is outside the editable window",
            ),
            EngineError::ReportRangeTooLong { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                &error,
                "Request a shorter custom range",
            ),
            EngineError::StorageError { .. } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR",
                &error,
                "Persisted state could not be read or written",
            ),
        }
    }
}
