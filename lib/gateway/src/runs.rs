//! Run query and log stream endpoints.

use crate::{GatewayState, error::ApiError};
use axum::{
    Json,
    extract::{Path, State},
    response::sse::{Event, Sse},
};
use flowbit_dispatch::{DispatchError, RECENT_RUNS_LIMIT, RunRecord};
use futures::stream::{self, Stream};
use serde_json::{Value as JsonValue, json};
use std::convert::Infallible;
use tracing::{debug, error};

/// Number of lines a run log stream emits before it ends.
pub const LOG_STREAM_LINES: u32 = 5;

/// `GET /api/langflow/runs`: the most recent runs as `{runs: [...]}`.
pub async fn list_runs(State(state): State<GatewayState>) -> Result<Json<JsonValue>, ApiError> {
    let runs = state.runs.recent_runs(RECENT_RUNS_LIMIT).await.map_err(|e| {
        error!(error = %e, "failed to list runs");
        ApiError::RunsUnavailable
    })?;
    Ok(Json(json!({ "runs": runs })))
}

/// `GET /api/langflow/runs/{id}`.
pub async fn get_run(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<RunRecord>, ApiError> {
    let run = state.runs.run(&id).await.map_err(|e| {
        if let DispatchError::RunNotFound { id } = e.current_context() {
            return ApiError::RunNotFound { id: id.clone() };
        }
        error!(error = %e, run_id = %id, "failed to fetch run");
        ApiError::RunsUnavailable
    })?;
    Ok(Json(run))
}

/// `GET /api/langflow/runs/{id}/stream`: log lines as server-sent events,
/// one per stream interval, then the stream ends.
pub async fn stream_run_logs(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!(run_id = %id, "streaming run logs");
    let interval = state.stream_interval;
    let events = stream::unfold(1, move |line| {
        let id = id.clone();
        async move {
            if line > LOG_STREAM_LINES {
                return None;
            }
            tokio::time::sleep(interval).await;
            let event = Event::default().data(format!("Log line {line} for {id}"));
            Some((Ok(event), line + 1))
        }
    });
    Sse::new(events)
}
