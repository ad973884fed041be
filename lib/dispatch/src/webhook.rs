//! Webhook callback URLs.

use flowbit_core::WebhookId;
use serde::{Deserialize, Serialize};

/// A callback URL for a workflow plus a freshly minted identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookTarget {
    pub url: String,
    pub webhook_id: WebhookId,
}

impl WebhookTarget {
    /// Computes the console's own hook URL for `workflow_id`. Nothing is
    /// persisted; every call mints a new id.
    #[must_use]
    pub fn generate(public_base: &str, workflow_id: &str) -> Self {
        Self {
            url: format!(
                "{}/api/hooks/{workflow_id}",
                public_base.trim_end_matches('/')
            ),
            webhook_id: WebhookId::new(),
        }
    }
}

/// The engine-side webhook URL shown in the composer's webhook tab.
#[must_use]
pub fn engine_webhook_url(api_base: &str, workflow_id: &str) -> String {
    format!(
        "{}/api/langflow/webhook/{workflow_id}",
        api_base.trim_end_matches('/')
    )
}
