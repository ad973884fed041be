//! Error types for the catalog crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `CatalogError`: failures reading flows from an engine backend

use crate::engine::Engine;
use std::fmt;

/// Errors from catalog operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The flows request could not be sent or no response arrived.
    RequestFailed { endpoint: String, details: String },
    /// The backend answered with a non-success status.
    UnexpectedStatus { endpoint: String, status: u16 },
    /// The response body was not a list of flows.
    InvalidResponse { endpoint: String, details: String },
    /// A live folder is bound to an engine with no registered flow source.
    MissingSource { engine: Engine },
    /// An engine name did not match any known engine.
    UnknownEngine { value: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestFailed { endpoint, details } => {
                write!(f, "request to '{endpoint}' failed: {details}")
            }
            Self::UnexpectedStatus { endpoint, status } => {
                write!(f, "'{endpoint}' answered with status {status}")
            }
            Self::InvalidResponse { endpoint, details } => {
                write!(f, "invalid flow list from '{endpoint}': {details}")
            }
            Self::MissingSource { engine } => {
                write!(f, "no flow source registered for engine '{engine}'")
            }
            Self::UnknownEngine { value } => write!(f, "unknown engine '{value}'"),
        }
    }
}

impl std::error::Error for CatalogError {}
