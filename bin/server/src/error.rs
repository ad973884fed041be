//! Domain error types for server operations.
//!
//! Server functions log the underlying cause with `tracing` and return one
//! of these, converted into a user-safe `ServerFnError`.

use leptos::server_fn::error::ServerFnError;
use std::fmt;

/// Errors raised by dashboard server functions.
#[derive(Debug)]
pub enum DashboardError {
    /// The dashboard services were not installed on the request.
    ServicesUnavailable { details: String },
    /// The run list could not be fetched.
    RunsUnavailable { details: String },
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServicesUnavailable { details } => {
                write!(f, "dashboard services unavailable: {details}")
            }
            Self::RunsUnavailable { details } => write!(f, "failed to fetch runs: {details}"),
        }
    }
}

impl std::error::Error for DashboardError {}

impl DashboardError {
    /// Convert to a user-safe ServerFnError.
    pub fn into_server_error(self) -> ServerFnError {
        match self {
            Self::ServicesUnavailable { .. } => ServerFnError::new("Service unavailable"),
            Self::RunsUnavailable { .. } => ServerFnError::new("Failed to fetch runs"),
        }
    }
}
