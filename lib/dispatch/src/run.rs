//! Run records and the sources that provide them.
//!
//! The console has no run store of its own. [`PlaceholderRuns`] answers with
//! synthesized records until a real store is wired in behind [`RunSource`].

use crate::error::DispatchError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rootcause::prelude::Report;
use serde::{Deserialize, Serialize};

/// Number of runs returned by run-list queries.
pub const RECENT_RUNS_LIMIT: usize = 50;

/// Lifecycle state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Pending,
    Started,
    Running,
    Completed,
    Failed,
    /// Any status string this console does not know.
    #[serde(other)]
    Unknown,
}

/// One historical or in-progress execution of a workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    pub id: String,
    pub status: RunStatus,
    pub flow_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default)]
    pub logs: Vec<String>,
    pub created_at: DateTime<Utc>,
    /// Duration in milliseconds.
    pub duration: u64,
}

/// A run as reported by the flows backend, timed in epoch seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendRun {
    pub id: String,
    #[serde(default = "unknown_flow")]
    pub flow_id: String,
    pub status: RunStatus,
    pub start_time: f64,
    #[serde(default)]
    pub end_time: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
}

fn unknown_flow() -> String {
    "unknown".to_string()
}

impl From<BackendRun> for RunRecord {
    fn from(run: BackendRun) -> Self {
        let created_at =
            DateTime::from_timestamp_millis((run.start_time * 1000.0) as i64).unwrap_or_default();
        let duration = run
            .duration
            .map(|secs| (secs * 1000.0).round().max(0.0) as u64)
            .unwrap_or(0);
        Self {
            id: run.id,
            status: run.status,
            flow_name: run.flow_id,
            output: None,
            logs: Vec::new(),
            created_at,
            duration,
        }
    }
}

/// Read access to run records.
#[async_trait]
pub trait RunSource: Send + Sync {
    /// The most recent runs, newest first, at most `limit` of them.
    async fn recent_runs(&self, limit: usize) -> Result<Vec<RunRecord>, Report<DispatchError>>;

    /// A single run by id.
    async fn run(&self, id: &str) -> Result<RunRecord, Report<DispatchError>>;
}

/// Synthesizes run-shaped records without any backing store.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderRuns;

#[async_trait]
impl RunSource for PlaceholderRuns {
    async fn recent_runs(&self, limit: usize) -> Result<Vec<RunRecord>, Report<DispatchError>> {
        let run = RunRecord {
            id: "run_email_1234".to_string(),
            status: RunStatus::Completed,
            flow_name: "Email Agent".to_string(),
            output: None,
            logs: Vec::new(),
            created_at: Utc::now(),
            duration: 2000,
        };
        Ok(std::iter::once(run).take(limit).collect())
    }

    async fn run(&self, id: &str) -> Result<RunRecord, Report<DispatchError>> {
        Ok(RunRecord {
            id: id.to_string(),
            status: RunStatus::Completed,
            flow_name: "Email Agent".to_string(),
            output: Some(format!("Mock output for run {id}")),
            logs: Vec::new(),
            created_at: Utc::now(),
            duration: 2000,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_run_converts_seconds_to_millis() {
        let run: BackendRun = serde_json::from_str(
            r#"{"id":"run_email_1","flow_id":"email","status":"completed",
                "start_time":1700000000.5,"end_time":1700000002.75,"duration":2.25}"#,
        )
        .expect("deserialize");
        let record = RunRecord::from(run);
        assert_eq!(record.flow_name, "email");
        assert_eq!(record.duration, 2250);
        assert_eq!(record.created_at.timestamp_millis(), 1_700_000_000_500);
        assert_eq!(record.status, RunStatus::Completed);
    }

    #[test]
    fn backend_run_tolerates_missing_fields() {
        let run: BackendRun =
            serde_json::from_str(r#"{"id":"r","status":"queued","start_time":0}"#)
                .expect("deserialize");
        assert_eq!(run.flow_id, "unknown");
        assert_eq!(run.status, RunStatus::Unknown);
        assert_eq!(RunRecord::from(run).duration, 0);
    }

    #[tokio::test]
    async fn placeholder_detail_echoes_id() {
        let run = PlaceholderRuns.run("run_42").await.expect("run");
        assert_eq!(run.id, "run_42");
        assert_eq!(run.status, RunStatus::Completed);
        assert_eq!(run.output.as_deref(), Some("Mock output for run run_42"));
        assert!(run.logs.is_empty());

        let json = serde_json::to_value(&run).expect("serialize");
        assert_eq!(json["flowName"], "Email Agent");
        assert_eq!(json["logs"], serde_json::json!([]));
        assert_eq!(json["duration"], 2000);
    }

    #[tokio::test]
    async fn placeholder_list_respects_limit() {
        let runs = PlaceholderRuns
            .recent_runs(RECENT_RUNS_LIMIT)
            .await
            .expect("runs");
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].id, "run_email_1234");
        assert!(PlaceholderRuns.recent_runs(0).await.expect("runs").is_empty());
    }
}
