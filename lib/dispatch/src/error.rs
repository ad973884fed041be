//! Error types for the dispatch crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `DispatchError`: failures talking to an engine backend or building
//!   a request for it

use std::fmt;

/// Errors from dispatch operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The request could not be sent or no response arrived.
    RequestFailed { endpoint: String, details: String },
    /// The backend answered with a non-success status.
    Rejected {
        endpoint: String,
        status: u16,
        /// The backend's `detail` field, when it sent one.
        detail: Option<String>,
    },
    /// The response body could not be decoded.
    InvalidResponse { endpoint: String, details: String },
    /// A cron expression is not five whitespace-separated fields.
    InvalidCronExpression { expression: String, reason: String },
    /// No run with this id is known.
    RunNotFound { id: String },
}

impl DispatchError {
    /// The backend-supplied rejection detail, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestFailed { endpoint, details } => {
                write!(f, "request to '{endpoint}' failed: {details}")
            }
            Self::Rejected {
                endpoint,
                status,
                detail,
            } => {
                write!(f, "'{endpoint}' rejected the request with status {status}")?;
                if let Some(detail) = detail {
                    write!(f, ": {detail}")?;
                }
                Ok(())
            }
            Self::InvalidResponse { endpoint, details } => {
                write!(f, "invalid response from '{endpoint}': {details}")
            }
            Self::InvalidCronExpression { expression, reason } => {
                write!(f, "invalid cron expression '{expression}': {reason}")
            }
            Self::RunNotFound { id } => write!(f, "run not found: {id}"),
        }
    }
}

impl std::error::Error for DispatchError {}
