//! Trigger requests sent to an engine backend.

use flowbit_catalog::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// How a run was initiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerType {
    /// User-initiated with a hand-written payload.
    #[default]
    Manual,
    /// Inbound HTTP call to a webhook URL.
    Webhook,
    /// Cron schedule.
    Schedule,
}

impl TriggerType {
    pub const ALL: [TriggerType; 3] = [Self::Manual, Self::Webhook, Self::Schedule];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Webhook => "webhook",
            Self::Schedule => "schedule",
        }
    }
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The wire payload asking an engine to start a run.
///
/// Sent once; there is no retry and no idempotency key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerRequest {
    pub workflow_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<Engine>,
    pub trigger_type: TriggerType,
    #[serde(default)]
    pub input_payload: JsonValue,
}

impl TriggerRequest {
    /// A request built by the trigger composer.
    #[must_use]
    pub fn new(
        workflow_id: impl Into<String>,
        engine: Engine,
        trigger_type: TriggerType,
        input_payload: JsonValue,
    ) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            engine: Some(engine),
            trigger_type,
            input_payload,
        }
    }

    /// A request relaying an inbound webhook payload unmodified.
    #[must_use]
    pub fn webhook(workflow_id: impl Into<String>, input_payload: JsonValue) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            engine: None,
            trigger_type: TriggerType::Webhook,
            input_payload,
        }
    }
}

/// The backend's reply to an accepted trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerAck {
    #[serde(default)]
    pub run_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}
