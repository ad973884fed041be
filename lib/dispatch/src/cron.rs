//! Cron-job registrations.

use crate::error::DispatchError;
use flowbit_core::CronJobId;
use serde::{Deserialize, Serialize};

/// Schedule part of a cron-job payload. The whole expression travels in
/// `minute`, which is the shape the cron-jobs endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CronSchedule {
    pub minute: String,
}

/// A cron-job registration for a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronJob {
    pub id: CronJobId,
    pub workflow_id: String,
    pub schedule: CronSchedule,
}

impl CronJob {
    /// Creates a job with a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression is not a five-field cron expression.
    pub fn new(
        workflow_id: impl Into<String>,
        expression: &str,
    ) -> Result<Self, DispatchError> {
        validate_cron_expression(expression)?;
        Ok(Self {
            id: CronJobId::new(),
            workflow_id: workflow_id.into(),
            schedule: CronSchedule {
                minute: expression.trim().to_string(),
            },
        })
    }
}

/// Checks that `expression` has the five standard cron fields.
///
/// # Errors
///
/// Returns [`DispatchError::InvalidCronExpression`] otherwise.
pub fn validate_cron_expression(expression: &str) -> Result<(), DispatchError> {
    let parts = expression.split_whitespace().count();
    if parts != 5 {
        return Err(DispatchError::InvalidCronExpression {
            expression: expression.to_string(),
            reason: format!("expected 5 parts, got {parts}"),
        });
    }
    Ok(())
}
