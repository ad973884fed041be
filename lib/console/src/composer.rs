//! Trigger composer: the "Create Workflow" modal.
//!
//! A submission is split in three so the component can run the network leg
//! wherever it likes (a server function in the app, a fake in tests):
//!
//! 1. [`ComposerState::begin_submit`] validates the form and yields the
//!    request, or records an alert and yields nothing.
//! 2. [`submit_trigger`] sends it and re-queries the run list.
//! 3. [`ComposerState::finish_submit`] closes the modal or shows the failure.

use crate::error::ComposerError;
use flowbit_catalog::{Engine, FolderId, FolderWorkflows, Workflow};
use flowbit_core::CronJobId;
use flowbit_dispatch::{
    CronJob, RunRecord, TriggerAck, TriggerBackend, TriggerRequest, TriggerType,
    engine_webhook_url,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};
use tracing::{info, warn};

/// Initial text of the manual payload editor.
pub const DEFAULT_MANUAL_PAYLOAD: &str = "{}";

/// Everything the user has typed or picked in the modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposerForm {
    pub engine: Option<Engine>,
    pub folder: FolderId,
    pub workflow_id: String,
    pub tab: TriggerType,
    pub manual_payload: String,
    pub cron_expression: String,
}

impl Default for ComposerForm {
    fn default() -> Self {
        Self {
            engine: None,
            folder: FolderId::unassigned(),
            workflow_id: String::new(),
            tab: TriggerType::Manual,
            manual_payload: DEFAULT_MANUAL_PAYLOAD.to_string(),
            cron_expression: String::new(),
        }
    }
}

impl ComposerForm {
    /// Whether the trigger tabs are shown for the selected engine.
    #[must_use]
    pub fn shows_trigger_tabs(&self) -> bool {
        self.engine.is_some_and(|engine| engine.supports_triggers())
    }

    /// The tab that decides the payload. Engines without trigger tabs
    /// always submit the manual payload.
    #[must_use]
    pub fn effective_tab(&self) -> TriggerType {
        if self.shows_trigger_tabs() {
            self.tab
        } else {
            TriggerType::Manual
        }
    }

    /// The engine-side webhook URL, once a Langflow workflow is picked.
    #[must_use]
    pub fn webhook_url(&self, api_base: &str) -> Option<String> {
        (self.engine == Some(Engine::Langflow) && !self.workflow_id.is_empty())
            .then(|| engine_webhook_url(api_base, &self.workflow_id))
    }

    #[must_use]
    pub fn action_label(&self) -> &'static str {
        if self.shows_trigger_tabs() {
            "Create Trigger"
        } else {
            "Create Workflow"
        }
    }

    /// Line under the engine picker: trigger hint for Langflow, the
    /// engine's own URL otherwise.
    #[must_use]
    pub fn subtitle(&self) -> Option<String> {
        let engine = self.engine?;
        Some(if engine.supports_triggers() {
            "Configure workflow triggers".to_string()
        } else {
            format!("Opens in: {}", engine.profile().url)
        })
    }

    /// Workflows of the selected folder that run on the selected engine.
    #[must_use]
    pub fn workflow_options<'a>(&self, catalog: &'a FolderWorkflows) -> Vec<&'a Workflow> {
        catalog
            .for_folder(self.folder.as_str())
            .iter()
            .filter(|workflow| self.engine.is_none_or(|engine| workflow.engine == engine))
            .collect()
    }

    /// Parses the manual payload; blank text means `{}`.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::InvalidPayload`] if the text is not JSON.
    pub fn parse_manual_payload(&self) -> Result<JsonValue, ComposerError> {
        let text = self.manual_payload.trim();
        if text.is_empty() {
            return Ok(json!({}));
        }
        serde_json::from_str(text).map_err(|e| ComposerError::InvalidPayload {
            reason: e.to_string(),
        })
    }

    /// Builds the trigger request for the current form.
    ///
    /// # Errors
    ///
    /// Returns an error if no engine or workflow is selected, or if the
    /// active tab's input does not validate.
    pub fn prepare_trigger(&self, api_base: &str) -> Result<TriggerRequest, ComposerError> {
        let engine = self.engine.ok_or(ComposerError::NoEngine)?;
        let workflow_id = self.workflow_id.trim();
        if workflow_id.is_empty() {
            return Err(ComposerError::MissingWorkflow);
        }

        let tab = self.effective_tab();
        let payload = match tab {
            TriggerType::Manual => self.parse_manual_payload()?,
            TriggerType::Webhook => {
                json!({ "webhookUrl": engine_webhook_url(api_base, workflow_id) })
            }
            TriggerType::Schedule => {
                flowbit_dispatch::validate_cron_expression(&self.cron_expression)?;
                json!({ "cron": self.cron_expression.trim() })
            }
        };

        Ok(TriggerRequest::new(workflow_id, engine, tab, payload))
    }

    /// Builds a cron-job registration for the selected workflow.
    ///
    /// # Errors
    ///
    /// Returns an error if no workflow is selected or the expression is not
    /// five fields.
    pub fn prepare_cron_job(&self) -> Result<CronJob, ComposerError> {
        let workflow_id = self.workflow_id.trim();
        if workflow_id.is_empty() {
            return Err(ComposerError::MissingWorkflow);
        }
        Ok(CronJob::new(workflow_id, &self.cron_expression)?)
    }
}

/// A change to the composer.
#[derive(Debug, Clone, PartialEq)]
pub enum ComposerAction {
    Open,
    Close,
    SelectEngine(Option<Engine>),
    SelectFolder(FolderId),
    SelectWorkflow(String),
    SelectTab(TriggerType),
    EditPayload(String),
    EditCron(String),
    RunsLoaded(Vec<RunRecord>),
    DismissAlert,
}

/// Side effect requested by a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerEffect {
    /// The run list should be fetched.
    LoadRuns,
}

/// The modal's state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposerState {
    pub form: ComposerForm,
    open: bool,
    runs: Vec<RunRecord>,
    alert: Option<String>,
    submitting: bool,
    last_scheduled: Option<CronJobId>,
}

impl ComposerState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[must_use]
    pub fn runs(&self) -> &[RunRecord] {
        &self.runs
    }

    #[must_use]
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    #[must_use]
    pub fn last_scheduled(&self) -> Option<&CronJobId> {
        self.last_scheduled.as_ref()
    }

    fn wants_runs(&self) -> Option<ComposerEffect> {
        (self.open && self.form.engine == Some(Engine::Langflow)).then_some(ComposerEffect::LoadRuns)
    }

    /// Applies an action, returning the effect the owner should run.
    pub fn apply(&mut self, action: ComposerAction) -> Option<ComposerEffect> {
        match action {
            ComposerAction::Open => {
                self.open = true;
                self.alert = None;
                self.wants_runs()
            }
            ComposerAction::Close => {
                self.open = false;
                None
            }
            // A new engine or folder invalidates the selected workflow
            ComposerAction::SelectEngine(engine) => {
                if self.form.engine == engine {
                    return None;
                }
                self.form.engine = engine;
                self.form.workflow_id.clear();
                self.wants_runs()
            }
            ComposerAction::SelectFolder(folder) => {
                if self.form.folder != folder {
                    self.form.folder = folder;
                    self.form.workflow_id.clear();
                }
                None
            }
            ComposerAction::SelectWorkflow(id) => {
                self.form.workflow_id = id;
                None
            }
            ComposerAction::SelectTab(tab) => {
                self.form.tab = tab;
                None
            }
            ComposerAction::EditPayload(text) => {
                self.form.manual_payload = text;
                None
            }
            ComposerAction::EditCron(expression) => {
                self.form.cron_expression = expression;
                None
            }
            ComposerAction::RunsLoaded(runs) => {
                self.runs = runs;
                None
            }
            ComposerAction::DismissAlert => {
                self.alert = None;
                None
            }
        }
    }

    /// Validates the form. Returns the request to send, or `None` after
    /// recording why nothing will be sent. A missing engine is ignored
    /// without an alert.
    pub fn begin_submit(&mut self, api_base: &str) -> Option<TriggerRequest> {
        if self.submitting {
            return None;
        }
        match self.form.prepare_trigger(api_base) {
            Ok(request) => {
                self.alert = None;
                self.submitting = true;
                Some(request)
            }
            Err(ComposerError::NoEngine) => None,
            Err(e) => {
                self.alert = Some(e.alert_message());
                None
            }
        }
    }

    /// Records the result of a submission.
    pub fn finish_submit(&mut self, result: Result<SubmitOutcome, ComposerError>) {
        self.submitting = false;
        match result {
            Ok(outcome) => {
                if let Some(runs) = outcome.runs {
                    self.runs = runs;
                }
                self.alert = None;
                self.open = false;
            }
            Err(e) => self.alert = Some(e.alert_message()),
        }
    }

    /// Validates the cron form. Returns the job to register, or `None` after
    /// recording an alert.
    pub fn begin_schedule(&mut self) -> Option<CronJob> {
        match self.form.prepare_cron_job() {
            Ok(job) => {
                self.alert = None;
                Some(job)
            }
            Err(e) => {
                self.alert = Some(e.alert_message());
                None
            }
        }
    }

    /// Records the result of a cron-job registration.
    pub fn finish_schedule(&mut self, result: Result<CronJobId, ComposerError>) {
        match result {
            Ok(id) => {
                self.last_scheduled = Some(id);
                self.alert = None;
            }
            Err(e) => self.alert = Some(e.alert_message()),
        }
    }
}

/// What an accepted trigger produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub ack: TriggerAck,
    /// The refreshed run list; `None` if the refresh itself failed.
    pub runs: Option<Vec<RunRecord>>,
}

/// Sends a trigger request and re-queries the run list.
///
/// # Errors
///
/// Returns the composer error for a rejected or failed trigger. A failed
/// run refresh is logged and does not fail the submission.
pub async fn submit_trigger<B: TriggerBackend + ?Sized>(
    backend: &B,
    request: &TriggerRequest,
) -> Result<SubmitOutcome, ComposerError> {
    let ack = backend.trigger(request).await.map_err(|report| {
        warn!(error = %report, workflow_id = %request.workflow_id, "trigger failed");
        ComposerError::from_trigger_failure(&report)
    })?;
    info!(
        workflow_id = %request.workflow_id,
        trigger_type = %request.trigger_type,
        run_id = ?ack.run_id,
        "workflow triggered"
    );

    let runs = match backend.recent_runs().await {
        Ok(runs) => Some(runs),
        Err(e) => {
            warn!(error = %e, "failed to refresh runs after trigger");
            None
        }
    };

    Ok(SubmitOutcome { ack, runs })
}

/// Registers a cron job.
///
/// # Errors
///
/// Returns [`ComposerError::ScheduleFailed`] if the backend does not accept
/// the job.
pub async fn schedule_job<B: TriggerBackend + ?Sized>(
    backend: &B,
    job: &CronJob,
) -> Result<CronJobId, ComposerError> {
    backend.schedule(job).await.map_err(|report| {
        warn!(error = %report, job_id = %job.id, "cron job registration failed");
        ComposerError::ScheduleFailed {
            details: report.to_string(),
        }
    })?;
    info!(job_id = %job.id, workflow_id = %job.workflow_id, "cron job scheduled");
    Ok(job.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use flowbit_dispatch::{DispatchError, RunStatus};
    use rootcause::prelude::Report;
    use std::sync::Mutex;

    const API: &str = "http://localhost:8000";

    #[derive(Default)]
    struct RecordingBackend {
        triggers: Mutex<Vec<TriggerRequest>>,
        jobs: Mutex<Vec<CronJob>>,
        reject_with: Option<Option<String>>,
    }

    impl RecordingBackend {
        fn rejecting(detail: Option<&str>) -> Self {
            Self {
                reject_with: Some(detail.map(str::to_string)),
                ..Self::default()
            }
        }

        fn trigger_count(&self) -> usize {
            self.triggers.lock().expect("lock").len()
        }
    }

    #[async_trait]
    impl TriggerBackend for RecordingBackend {
        async fn trigger(
            &self,
            request: &TriggerRequest,
        ) -> Result<TriggerAck, Report<DispatchError>> {
            self.triggers.lock().expect("lock").push(request.clone());
            if let Some(detail) = &self.reject_with {
                return Err(DispatchError::Rejected {
                    endpoint: format!("{API}/api/langflow/trigger"),
                    status: 400,
                    detail: detail.clone(),
                }
                .into());
            }
            Ok(TriggerAck {
                run_id: Some(format!("run_{}_1", request.workflow_id)),
                status: Some("started".to_string()),
            })
        }

        async fn schedule(&self, job: &CronJob) -> Result<(), Report<DispatchError>> {
            self.jobs.lock().expect("lock").push(job.clone());
            Ok(())
        }

        async fn recent_runs(&self) -> Result<Vec<RunRecord>, Report<DispatchError>> {
            Ok(vec![RunRecord {
                id: "run_email_1".to_string(),
                status: RunStatus::Started,
                flow_name: "email".to_string(),
                output: None,
                logs: Vec::new(),
                created_at: Utc::now(),
                duration: 0,
            }])
        }
    }

    fn langflow_state() -> ComposerState {
        let mut state = ComposerState::new();
        state.apply(ComposerAction::Open);
        state.apply(ComposerAction::SelectEngine(Some(Engine::Langflow)));
        state
    }

    async fn run_submit(state: &mut ComposerState, backend: &RecordingBackend) {
        if let Some(request) = state.begin_submit(API) {
            let result = submit_trigger(backend, &request).await;
            state.finish_submit(result);
        }
    }

    #[tokio::test]
    async fn empty_workflow_sends_nothing() {
        let backend = RecordingBackend::default();
        let mut state = langflow_state();

        run_submit(&mut state, &backend).await;

        assert_eq!(backend.trigger_count(), 0);
        assert_eq!(state.alert(), Some("Please select a workflow first"));
        assert!(state.is_open());
    }

    #[tokio::test]
    async fn malformed_payload_sends_nothing() {
        let backend = RecordingBackend::default();
        let mut state = langflow_state();
        state.apply(ComposerAction::SelectWorkflow("email".to_string()));
        state.apply(ComposerAction::EditPayload("{invalid".to_string()));

        run_submit(&mut state, &backend).await;

        assert_eq!(backend.trigger_count(), 0);
        assert!(
            state
                .alert()
                .is_some_and(|alert| alert.starts_with("Invalid JSON payload"))
        );
    }

    #[tokio::test]
    async fn missing_engine_is_silent() {
        let backend = RecordingBackend::default();
        let mut state = ComposerState::new();
        state.apply(ComposerAction::Open);
        state.apply(ComposerAction::SelectWorkflow("email".to_string()));

        run_submit(&mut state, &backend).await;

        assert_eq!(backend.trigger_count(), 0);
        assert_eq!(state.alert(), None);
    }

    #[tokio::test]
    async fn success_refreshes_runs_and_closes() {
        let backend = RecordingBackend::default();
        let mut state = langflow_state();
        state.apply(ComposerAction::SelectWorkflow("email".to_string()));
        state.apply(ComposerAction::EditPayload(r#"{"subject":"hi"}"#.to_string()));

        run_submit(&mut state, &backend).await;

        assert!(!state.is_open());
        assert!(!state.is_submitting());
        assert_eq!(state.runs().len(), 1);
        let sent = backend.triggers.lock().expect("lock").clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].trigger_type, TriggerType::Manual);
        assert_eq!(sent[0].input_payload, json!({"subject": "hi"}));
    }

    #[tokio::test]
    async fn rejection_shows_backend_detail() {
        let backend = RecordingBackend::rejecting(Some("Flow not found"));
        let mut state = langflow_state();
        state.apply(ComposerAction::SelectWorkflow("missing".to_string()));

        run_submit(&mut state, &backend).await;

        assert_eq!(backend.trigger_count(), 1);
        assert_eq!(state.alert(), Some("Flow not found"));
        assert!(state.is_open());
    }

    #[tokio::test]
    async fn rejection_without_detail_shows_generic_message() {
        let backend = RecordingBackend::rejecting(None);
        let mut state = langflow_state();
        state.apply(ComposerAction::SelectWorkflow("email".to_string()));

        run_submit(&mut state, &backend).await;

        assert_eq!(state.alert(), Some("Trigger failed"));
    }

    #[test]
    fn blank_payload_means_empty_object() {
        let form = ComposerForm {
            manual_payload: "  ".to_string(),
            ..ComposerForm::default()
        };
        assert_eq!(form.parse_manual_payload().expect("payload"), json!({}));
    }

    #[test]
    fn tab_payloads() {
        let mut form = ComposerForm {
            engine: Some(Engine::Langflow),
            workflow_id: "email".to_string(),
            cron_expression: "0 7 * * *".to_string(),
            ..ComposerForm::default()
        };

        form.tab = TriggerType::Webhook;
        let request = form.prepare_trigger(API).expect("webhook");
        assert_eq!(
            request.input_payload,
            json!({"webhookUrl": "http://localhost:8000/api/langflow/webhook/email"})
        );

        form.tab = TriggerType::Schedule;
        let request = form.prepare_trigger(API).expect("schedule");
        assert_eq!(request.trigger_type, TriggerType::Schedule);
        assert_eq!(request.input_payload, json!({"cron": "0 7 * * *"}));

        form.cron_expression = "0 7".to_string();
        assert!(matches!(
            form.prepare_trigger(API),
            Err(ComposerError::InvalidCron { .. })
        ));
    }

    #[test]
    fn engines_without_tabs_submit_manual_payload() {
        let form = ComposerForm {
            engine: Some(Engine::N8n),
            workflow_id: "wf-3".to_string(),
            tab: TriggerType::Webhook,
            ..ComposerForm::default()
        };

        let request = form.prepare_trigger(API).expect("request");

        assert_eq!(request.trigger_type, TriggerType::Manual);
        assert_eq!(form.action_label(), "Create Workflow");
        assert!(
            form.subtitle()
                .is_some_and(|subtitle| subtitle.starts_with("Opens in: "))
        );
        assert_eq!(form.webhook_url(API), None);
    }

    #[test]
    fn langflow_labels_and_webhook_url() {
        let mut form = ComposerForm {
            engine: Some(Engine::Langflow),
            ..ComposerForm::default()
        };
        assert_eq!(form.action_label(), "Create Trigger");
        assert_eq!(form.subtitle().as_deref(), Some("Configure workflow triggers"));
        assert_eq!(form.webhook_url(API), None);

        form.workflow_id = "email".to_string();
        assert_eq!(
            form.webhook_url(API).as_deref(),
            Some("http://localhost:8000/api/langflow/webhook/email")
        );
    }

    #[test]
    fn opening_with_langflow_loads_runs() {
        let mut state = ComposerState::new();
        assert_eq!(
            state.apply(ComposerAction::SelectEngine(Some(Engine::Langflow))),
            None
        );
        assert_eq!(
            state.apply(ComposerAction::Open),
            Some(ComposerEffect::LoadRuns)
        );
        assert_eq!(state.apply(ComposerAction::SelectEngine(Some(Engine::N8n))), None);
        assert_eq!(
            state.apply(ComposerAction::SelectEngine(Some(Engine::Langflow))),
            Some(ComposerEffect::LoadRuns)
        );
    }

    #[test]
    fn changing_engine_or_folder_drops_the_workflow() {
        let mut state = ComposerState::new();
        state.apply(ComposerAction::Open);
        state.apply(ComposerAction::SelectEngine(Some(Engine::Langflow)));
        state.apply(ComposerAction::SelectFolder(FolderId::from("data-processing")));
        state.apply(ComposerAction::SelectWorkflow("wf-5".to_string()));

        state.apply(ComposerAction::SelectEngine(Some(Engine::N8n)));

        assert!(state.form.workflow_id.is_empty());
        assert_eq!(state.begin_submit(API), None);
        assert_eq!(state.alert(), Some("Please select a workflow first"));

        state.apply(ComposerAction::SelectWorkflow("wf-6".to_string()));
        state.apply(ComposerAction::SelectFolder(FolderId::from("data-processing")));
        assert_eq!(state.form.workflow_id, "wf-6");

        state.apply(ComposerAction::SelectFolder(FolderId::from("marketing")));
        assert!(state.form.workflow_id.is_empty());
    }

    #[test]
    fn workflow_options_follow_folder_and_engine() {
        let catalog: FolderWorkflows = [(
            FolderId::from("data-processing"),
            vec![
                Workflow::new("wf-5", "ETL Pipeline", Engine::Langflow),
                Workflow::new("wf-6", "Report Generator", Engine::N8n),
            ],
        )]
        .into_iter()
        .collect();
        let form = ComposerForm {
            engine: Some(Engine::Langflow),
            folder: FolderId::from("data-processing"),
            ..ComposerForm::default()
        };

        let options = form.workflow_options(&catalog);

        assert_eq!(options.len(), 1);
        assert_eq!(options[0].id, "wf-5");
    }

    #[tokio::test]
    async fn schedule_registers_job_with_fresh_id() {
        let backend = RecordingBackend::default();
        let mut state = langflow_state();
        state.apply(ComposerAction::SelectWorkflow("email".to_string()));
        state.apply(ComposerAction::EditCron("*/5 * * * *".to_string()));

        let job = state.begin_schedule().expect("job");
        let result = schedule_job(&backend, &job).await;
        state.finish_schedule(result);

        assert_eq!(state.last_scheduled(), Some(&job.id));
        let jobs = backend.jobs.lock().expect("lock").clone();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].schedule.minute, "*/5 * * * *");
    }

    #[test]
    fn schedule_requires_valid_expression() {
        let mut state = langflow_state();
        state.apply(ComposerAction::SelectWorkflow("email".to_string()));
        state.apply(ComposerAction::EditCron("every day".to_string()));

        assert!(state.begin_schedule().is_none());
        assert!(
            state
                .alert()
                .is_some_and(|alert| alert.contains("expected 5 parts, got 2"))
        );
    }
}
