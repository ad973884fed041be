//! Workflow fetcher: reads engine flows and partitions them into folders.

use crate::catalog::CatalogConfig;
use crate::engine::Engine;
use crate::error::CatalogError;
use crate::folder::Folder;
use crate::workflow::{BackendFlow, FolderWorkflows};
use async_trait::async_trait;
use rootcause::prelude::Report;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// A backend that lists the flows of one engine.
#[async_trait]
pub trait FlowSource: Send + Sync {
    /// Lists every flow the engine knows about.
    async fn list_flows(&self) -> Result<Vec<BackendFlow>, Report<CatalogError>>;
}

/// Flow source backed by the `/api/langflow/flows` endpoint of the API server.
#[derive(Debug, Clone)]
pub struct HttpFlowSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpFlowSource {
    /// Creates a source reading from `{api_base}/api/langflow/flows`.
    #[must_use]
    pub fn new(client: reqwest::Client, api_base: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/langflow/flows", api_base.trim_end_matches('/')),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl FlowSource for HttpFlowSource {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn list_flows(&self) -> Result<Vec<BackendFlow>, Report<CatalogError>> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| CatalogError::RequestFailed {
                endpoint: self.endpoint.clone(),
                details: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
            }
            .into());
        }

        let flows = response
            .json::<Vec<BackendFlow>>()
            .await
            .map_err(|e| CatalogError::InvalidResponse {
                endpoint: self.endpoint.clone(),
                details: e.to_string(),
            })?;

        debug!(flow_count = flows.len(), "fetched backend flows");
        Ok(flows)
    }
}

/// Populates folders from live engine sources and the static table.
#[derive(Clone, Default)]
pub struct WorkflowFetcher {
    config: CatalogConfig,
    sources: HashMap<Engine, Arc<dyn FlowSource>>,
}

impl WorkflowFetcher {
    /// Creates a fetcher with no flow sources registered.
    #[must_use]
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            sources: HashMap::new(),
        }
    }

    /// Registers the flow source of an engine.
    #[must_use]
    pub fn with_source(mut self, engine: Engine, source: Arc<dyn FlowSource>) -> Self {
        self.sources.insert(engine, source);
        self
    }

    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Assigns workflows to every folder in `folders`.
    ///
    /// Live folders receive their engine's flows tagged with that engine;
    /// other folders receive their static list, or nothing.
    #[must_use]
    pub fn partition(
        &self,
        folders: &[Folder],
        live_flows: &HashMap<Engine, Vec<BackendFlow>>,
    ) -> FolderWorkflows {
        folders
            .iter()
            .map(|folder| {
                let workflows = match self.config.live_engine(folder.id.as_str()) {
                    Some(engine) => live_flows
                        .get(&engine)
                        .map(|flows| flows.iter().cloned().map(|f| f.tag(engine)).collect())
                        .unwrap_or_default(),
                    None => self.config.static_workflows(folder.id.as_str()).to_vec(),
                };
                (folder.id.clone(), workflows)
            })
            .collect()
    }

    /// Queries each engine needed by `folders` once, then partitions.
    ///
    /// # Errors
    ///
    /// Returns an error if any engine source is missing or fails.
    pub async fn try_fetch(
        &self,
        folders: &[Folder],
    ) -> Result<FolderWorkflows, Report<CatalogError>> {
        let mut live_flows = HashMap::new();
        for engine in self.config.engines_for(folders) {
            let source = self
                .sources
                .get(&engine)
                .ok_or(CatalogError::MissingSource { engine })?;
            live_flows.insert(engine, source.list_flows().await?);
        }
        Ok(self.partition(folders, &live_flows))
    }

    /// Like [`try_fetch`](Self::try_fetch), but a failure is logged and
    /// yields no workflows at all.
    pub async fn fetch(&self, folders: &[Folder]) -> FolderWorkflows {
        match self.try_fetch(folders).await {
            Ok(workflows) => workflows,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    folder_count = folders.len(),
                    "Error fetching workflows"
                );
                FolderWorkflows::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folder::FolderId;
    use crate::workflow::Workflow;
    use axum::{Json, Router, http::StatusCode, routing::get};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubSource {
        flows: Vec<BackendFlow>,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn new(flows: Vec<BackendFlow>) -> Arc<Self> {
            Arc::new(Self {
                flows,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl FlowSource for StubSource {
        async fn list_flows(&self) -> Result<Vec<BackendFlow>, Report<CatalogError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.flows.clone())
        }
    }

    struct DownSource;

    #[async_trait]
    impl FlowSource for DownSource {
        async fn list_flows(&self) -> Result<Vec<BackendFlow>, Report<CatalogError>> {
            Err(CatalogError::RequestFailed {
                endpoint: "http://localhost:8000/api/langflow/flows".to_string(),
                details: "connection refused".to_string(),
            }
            .into())
        }
    }

    fn flow(id: &str, name: &str) -> BackendFlow {
        BackendFlow {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn folders(ids: &[&str]) -> Vec<Folder> {
        ids.iter().map(|id| Folder::new(*id, *id)).collect()
    }

    #[tokio::test]
    async fn live_flows_land_in_unassigned_and_static_elsewhere() {
        let fetcher = WorkflowFetcher::new(CatalogConfig::default())
            .with_source(Engine::Langflow, StubSource::new(vec![flow("f1", "X")]));

        let workflows = fetcher.fetch(&folders(&["unassigned", "marketing"])).await;

        assert_eq!(
            workflows.for_folder("unassigned"),
            [Workflow::new("f1", "X", Engine::Langflow)]
        );
        assert_eq!(
            workflows.for_folder("marketing"),
            [
                Workflow::new("wf-3", "Lead Scoring", Engine::N8n),
                Workflow::new("wf-4", "Campaign Tracker", Engine::Langsmith),
            ]
        );
    }

    #[tokio::test]
    async fn unrecognised_folder_is_present_but_empty() {
        let fetcher = WorkflowFetcher::new(CatalogConfig::default())
            .with_source(Engine::Langflow, StubSource::new(vec![]));

        let workflows = fetcher.fetch(&folders(&["archive"])).await;

        assert!(workflows.iter().any(|(id, _)| *id == FolderId::from("archive")));
        assert!(workflows.for_folder("archive").is_empty());
    }

    #[tokio::test]
    async fn each_engine_is_queried_once() {
        let mut config = CatalogConfig::default();
        config
            .live_folders
            .insert(FolderId::from("agents"), Engine::Langflow);
        let source = StubSource::new(vec![flow("email", "Email Agent")]);
        let fetcher = WorkflowFetcher::new(config).with_source(Engine::Langflow, source.clone());

        let workflows = fetcher.fetch(&folders(&["unassigned", "agents"])).await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(workflows.for_folder("agents").len(), 1);
        assert_eq!(workflows.for_folder("unassigned").len(), 1);
    }

    #[tokio::test]
    async fn source_failure_leaves_everything_empty() {
        let fetcher = WorkflowFetcher::new(CatalogConfig::default())
            .with_source(Engine::Langflow, Arc::new(DownSource));

        let workflows = fetcher.fetch(&folders(&["unassigned", "marketing"])).await;

        assert!(workflows.is_empty());
    }

    #[tokio::test]
    async fn missing_source_is_an_error() {
        let fetcher = WorkflowFetcher::new(CatalogConfig::default());

        let result = fetcher.try_fetch(&folders(&["unassigned"])).await;

        assert!(result.is_err());
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn http_source_reads_flow_list() {
        let router = Router::new().route(
            "/api/langflow/flows",
            get(|| async {
                Json(serde_json::json!([
                    {"id": "email", "name": "Email Agent"},
                    {"id": "pdf", "name": "PDF Agent"}
                ]))
            }),
        );
        let base = serve(router).await;
        let source = HttpFlowSource::new(reqwest::Client::new(), &format!("{base}/"));

        let flows = source.list_flows().await.expect("flows");

        assert_eq!(source.endpoint(), format!("{base}/api/langflow/flows"));
        assert_eq!(flows, vec![flow("email", "Email Agent"), flow("pdf", "PDF Agent")]);
    }

    #[tokio::test]
    async fn http_source_rejects_error_status() {
        let router = Router::new().route(
            "/api/langflow/flows",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let base = serve(router).await;
        let source = HttpFlowSource::new(reqwest::Client::new(), &base);

        let err = source.list_flows().await.expect_err("should fail");

        assert!(err.to_string().contains("503"));
    }
}
