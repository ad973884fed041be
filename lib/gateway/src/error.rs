//! Error responses of the gateway.
//!
//! Handlers log the underlying cause and return one of these; the client
//! only ever sees the generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Errors returned by gateway handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The inbound webhook could not be relayed.
    TriggerFailed,
    /// No run with this id exists.
    RunNotFound { id: String },
    /// The run source failed.
    RunsUnavailable,
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::RunNotFound { .. } => StatusCode::NOT_FOUND,
            Self::TriggerFailed | Self::RunsUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The `error` field of the response body.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::TriggerFailed => "Failed to trigger workflow",
            Self::RunNotFound { .. } => "Run not found",
            Self::RunsUnavailable => "Failed to fetch runs",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RunNotFound { id } => write!(f, "run '{id}' not found"),
            other => f.write_str(other.public_message()),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.public_message() }))).into_response()
    }
}
