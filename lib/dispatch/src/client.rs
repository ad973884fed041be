//! Engine backend client.

use crate::cron::CronJob;
use crate::error::DispatchError;
use crate::run::{BackendRun, RunRecord};
use crate::trigger::{TriggerAck, TriggerRequest};
use async_trait::async_trait;
use rootcause::prelude::Report;
use serde_json::Value as JsonValue;
use tracing::{debug, instrument};

/// The backend that accepts triggers and cron jobs on behalf of the engines.
#[async_trait]
pub trait TriggerBackend: Send + Sync {
    /// Asks the backend to start a run.
    async fn trigger(&self, request: &TriggerRequest) -> Result<TriggerAck, Report<DispatchError>>;

    /// Registers a cron job.
    async fn schedule(&self, job: &CronJob) -> Result<(), Report<DispatchError>>;

    /// Lists the backend's recent runs.
    async fn recent_runs(&self) -> Result<Vec<RunRecord>, Report<DispatchError>>;
}

/// [`TriggerBackend`] speaking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTriggerBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTriggerBackend {
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn post_json<T: serde::Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<Vec<u8>, Report<DispatchError>> {
        let response = self
            .client
            .post(endpoint)
            .json(body)
            .send()
            .await
            .map_err(|e| DispatchError::RequestFailed {
                endpoint: endpoint.to_string(),
                details: e.to_string(),
            })?;
        read_body(endpoint, response).await
    }
}

/// Reads the body of a response, turning non-success statuses into
/// [`DispatchError::Rejected`] with the backend's `detail` when present.
async fn read_body(
    endpoint: &str,
    response: reqwest::Response,
) -> Result<Vec<u8>, Report<DispatchError>> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| DispatchError::RequestFailed {
            endpoint: endpoint.to_string(),
            details: e.to_string(),
        })?;

    if !status.is_success() {
        let detail = serde_json::from_slice::<JsonValue>(&body)
            .ok()
            .and_then(|value| value.get("detail")?.as_str().map(str::to_string));
        return Err(DispatchError::Rejected {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            detail,
        }
        .into());
    }

    Ok(body.to_vec())
}

#[async_trait]
impl TriggerBackend for HttpTriggerBackend {
    #[instrument(skip(self, request), fields(workflow_id = %request.workflow_id, trigger_type = %request.trigger_type))]
    async fn trigger(&self, request: &TriggerRequest) -> Result<TriggerAck, Report<DispatchError>> {
        let endpoint = self.endpoint("/api/langflow/trigger");
        let body = self.post_json(&endpoint, request).await?;
        let ack = serde_json::from_slice::<TriggerAck>(&body).unwrap_or_else(|e| {
            debug!(error = %e, "trigger reply carried no acknowledgement");
            TriggerAck::default()
        });
        debug!(run_id = ?ack.run_id, "workflow triggered");
        Ok(ack)
    }

    #[instrument(skip(self, job), fields(job_id = %job.id, workflow_id = %job.workflow_id))]
    async fn schedule(&self, job: &CronJob) -> Result<(), Report<DispatchError>> {
        let endpoint = self.endpoint("/api/cron-jobs");
        self.post_json(&endpoint, job).await?;
        debug!("cron job registered");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn recent_runs(&self) -> Result<Vec<RunRecord>, Report<DispatchError>> {
        let endpoint = self.endpoint("/api/langflow/runs");
        let response = self
            .client
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| DispatchError::RequestFailed {
                endpoint: endpoint.clone(),
                details: e.to_string(),
            })?;
        let body = read_body(&endpoint, response).await?;
        let runs = serde_json::from_slice::<Vec<BackendRun>>(&body).map_err(|e| {
            DispatchError::InvalidResponse {
                endpoint: endpoint.clone(),
                details: e.to_string(),
            }
        })?;
        Ok(runs.into_iter().map(RunRecord::from).collect())
    }
}
