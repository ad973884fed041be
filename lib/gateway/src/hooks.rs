//! Webhook endpoints.

use crate::{GatewayState, error::ApiError};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use flowbit_dispatch::{TriggerRequest, WebhookTarget};
use serde_json::{Value as JsonValue, json};
use tracing::{error, info};

/// `GET /api/hooks/{workflow_id}`: a callback URL and a fresh webhook id.
pub async fn webhook_target(
    State(state): State<GatewayState>,
    Path(workflow_id): Path<String>,
) -> Json<WebhookTarget> {
    Json(WebhookTarget::generate(&state.public_base_url, &workflow_id))
}

/// `POST /api/hooks/{workflow_id}`: relays the body as a webhook trigger.
///
/// A body that is not JSON is treated like a failed relay.
pub async fn relay_webhook(
    State(state): State<GatewayState>,
    Path(workflow_id): Path<String>,
    body: Bytes,
) -> Result<Json<JsonValue>, ApiError> {
    let payload: JsonValue = serde_json::from_slice(&body).map_err(|e| {
        error!(error = %e, workflow_id = %workflow_id, "webhook body is not JSON");
        ApiError::TriggerFailed
    })?;

    let request = TriggerRequest::webhook(&workflow_id, payload);
    state.backend.trigger(&request).await.map_err(|e| {
        error!(error = %e, workflow_id = %workflow_id, "webhook relay failed");
        ApiError::TriggerFailed
    })?;

    info!(workflow_id = %workflow_id, "webhook relayed");
    Ok(Json(json!({ "success": true })))
}
