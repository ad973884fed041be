//! HTTP endpoints served next to the console UI.
//!
//! - `GET /api/hooks/{workflow_id}`: mint a webhook URL for a workflow
//! - `POST /api/hooks/{workflow_id}`: relay an inbound payload as a webhook trigger
//! - `GET /api/langflow/runs`: recent runs
//! - `GET /api/langflow/runs/{id}`: one run
//! - `GET /api/langflow/runs/{id}/stream`: run log lines as server-sent events

pub mod error;
pub mod hooks;
pub mod runs;

pub use error::ApiError;

use axum::{Router, routing::get};
use flowbit_dispatch::{RunSource, TriggerBackend};
use std::sync::Arc;
use std::time::Duration;

/// Delay between two log-stream events.
pub const DEFAULT_STREAM_INTERVAL: Duration = Duration::from_secs(1);

/// Shared state of the gateway handlers. Read-only after startup.
#[derive(Clone)]
pub struct GatewayState {
    pub public_base_url: String,
    pub backend: Arc<dyn TriggerBackend>,
    pub runs: Arc<dyn RunSource>,
    pub stream_interval: Duration,
}

impl GatewayState {
    #[must_use]
    pub fn new(
        public_base_url: impl Into<String>,
        backend: Arc<dyn TriggerBackend>,
        runs: Arc<dyn RunSource>,
    ) -> Self {
        Self {
            public_base_url: public_base_url.into(),
            backend,
            runs,
            stream_interval: DEFAULT_STREAM_INTERVAL,
        }
    }

    #[must_use]
    pub fn with_stream_interval(mut self, interval: Duration) -> Self {
        self.stream_interval = interval;
        self
    }
}

/// Builds the gateway router. It has no fallback so it can be merged into
/// the UI router.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route(
            "/api/hooks/{workflow_id}",
            get(hooks::webhook_target).post(hooks::relay_webhook),
        )
        .route("/api/langflow/runs", get(runs::list_runs))
        .route("/api/langflow/runs/{id}", get(runs::get_run))
        .route("/api/langflow/runs/{id}/stream", get(runs::stream_run_logs))
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, Response};
    use flowbit_dispatch::{
        CronJob, DispatchError, PlaceholderRuns, RunRecord, TriggerAck, TriggerRequest,
    };
    use rootcause::prelude::Report;
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Backend that records every trigger and optionally refuses them.
    #[derive(Default)]
    pub struct StubBackend {
        pub triggers: Mutex<Vec<TriggerRequest>>,
        pub fail: bool,
    }

    #[async_trait]
    impl TriggerBackend for StubBackend {
        async fn trigger(
            &self,
            request: &TriggerRequest,
        ) -> Result<TriggerAck, Report<DispatchError>> {
            self.triggers.lock().expect("lock").push(request.clone());
            if self.fail {
                return Err(DispatchError::Rejected {
                    endpoint: "http://localhost:8000/api/langflow/trigger".to_string(),
                    status: 503,
                    detail: None,
                }
                .into());
            }
            Ok(TriggerAck::default())
        }

        async fn schedule(&self, _job: &CronJob) -> Result<(), Report<DispatchError>> {
            Ok(())
        }

        async fn recent_runs(&self) -> Result<Vec<RunRecord>, Report<DispatchError>> {
            Ok(Vec::new())
        }
    }

    pub fn state(backend: Arc<StubBackend>) -> GatewayState {
        GatewayState::new("http://localhost:3000", backend, Arc::new(PlaceholderRuns))
            .with_stream_interval(Duration::ZERO)
    }

    pub async fn send(state: GatewayState, request: Request<Body>) -> Response<Body> {
        router(state).oneshot(request).await.expect("response")
    }

    pub async fn body_json(response: Response<Body>) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    pub async fn body_text(response: Response<Body>) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }
}
