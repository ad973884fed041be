//! Services shared by the dashboard server functions.

use crate::error::DashboardError;
use axum::Extension;
use flowbit_catalog::{Folder, WorkflowFetcher};
use flowbit_dispatch::TriggerBackend;
use std::sync::Arc;

/// Everything a dashboard server function needs, installed once at startup
/// as a request extension.
#[derive(Clone)]
pub struct DashboardServices {
    pub fetcher: WorkflowFetcher,
    pub backend: Arc<dyn TriggerBackend>,
    pub api_url: String,
}

impl DashboardServices {
    /// The configured folder list.
    #[must_use]
    pub fn folders(&self) -> &[Folder] {
        &self.fetcher.config().folders
    }

    /// Resolves folder ids sent by the client against the configured
    /// folders. Unknown ids become bare folders named after themselves.
    #[must_use]
    pub fn resolve_folders(&self, ids: &[String]) -> Vec<Folder> {
        ids.iter()
            .map(|id| {
                self.folders()
                    .iter()
                    .find(|folder| folder.id.as_str() == id)
                    .cloned()
                    .unwrap_or_else(|| Folder::new(id.as_str(), id.as_str()))
            })
            .collect()
    }
}

/// Extracts the dashboard services from the current request.
pub async fn get_services() -> Result<Arc<DashboardServices>, DashboardError> {
    let Extension(services) = leptos_axum::extract::<Extension<Arc<DashboardServices>>>()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Dashboard services missing from request");
            DashboardError::ServicesUnavailable {
                details: e.to_string(),
            }
        })?;
    Ok(services)
}
