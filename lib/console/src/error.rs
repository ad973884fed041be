//! Error types for the console crate.
//!
//! `ComposerError` is what the trigger composer shows the user. Backend
//! failures arrive as `Report<DispatchError>` and are folded into it so the
//! component only ever renders one message.

use flowbit_dispatch::DispatchError;
use rootcause::prelude::Report;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a composer submission did not go through.
///
/// Serializable so server functions can hand it to the browser as is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ComposerError {
    /// No automation engine is selected.
    NoEngine,
    /// No workflow is selected.
    MissingWorkflow,
    /// The manual payload is not valid JSON.
    InvalidPayload { reason: String },
    /// The cron expression is not five fields.
    InvalidCron { reason: String },
    /// The backend refused the trigger.
    Rejected { detail: Option<String> },
    /// The backend could not be reached or answered garbage.
    Unavailable { details: String },
    /// The cron job was not registered.
    ScheduleFailed { details: String },
}

impl ComposerError {
    /// The text shown in the composer's alert.
    #[must_use]
    pub fn alert_message(&self) -> String {
        match self {
            Self::NoEngine => "Please select an automation engine".to_string(),
            Self::MissingWorkflow => "Please select a workflow first".to_string(),
            Self::InvalidPayload { reason } => format!("Invalid JSON payload: {reason}"),
            Self::InvalidCron { reason } => format!("Invalid cron expression: {reason}"),
            Self::Rejected { detail } => detail
                .clone()
                .unwrap_or_else(|| "Trigger failed".to_string()),
            Self::Unavailable { .. } => "Failed to trigger workflow".to_string(),
            Self::ScheduleFailed { .. } => "Failed to schedule job".to_string(),
        }
    }

    /// Folds a trigger failure into a composer error.
    #[must_use]
    pub fn from_trigger_failure(report: &Report<DispatchError>) -> Self {
        match report.current_context() {
            DispatchError::Rejected { detail, .. } => Self::Rejected {
                detail: detail.clone(),
            },
            DispatchError::InvalidCronExpression { reason, .. } => Self::InvalidCron {
                reason: reason.clone(),
            },
            _ => Self::Unavailable {
                details: report.to_string(),
            },
        }
    }
}

impl From<DispatchError> for ComposerError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::InvalidCronExpression { reason, .. } => Self::InvalidCron { reason },
            DispatchError::Rejected { detail, .. } => Self::Rejected { detail },
            other => Self::Unavailable {
                details: other.to_string(),
            },
        }
    }
}

impl fmt::Display for ComposerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { details } => write!(f, "backend unavailable: {details}"),
            Self::ScheduleFailed { details } => write!(f, "schedule failed: {details}"),
            other => f.write_str(&other.alert_message()),
        }
    }
}

impl std::error::Error for ComposerError {}
