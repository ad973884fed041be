//! Catalog configuration: where each folder's workflows come from.
//!
//! A folder is either *live*, bound to an engine whose backend is queried
//! on every fetch, or *static*, listing a fixed set of workflows. Folders
//! with neither binding are empty.

use crate::engine::Engine;
use crate::folder::{Folder, FolderId, UNASSIGNED_FOLDER_ID, default_folders};
use crate::workflow::Workflow;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Folder-to-source bindings for the workflow fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Folders fed from an engine backend.
    #[serde(default = "default_live_folders")]
    pub live_folders: BTreeMap<FolderId, Engine>,

    /// Fixed workflow lists per folder.
    #[serde(default = "default_static_workflows")]
    pub static_workflows: BTreeMap<FolderId, Vec<Workflow>>,

    /// Initial folder list shown by the dashboard.
    #[serde(default = "default_folders")]
    pub folders: Vec<Folder>,
}

fn default_live_folders() -> BTreeMap<FolderId, Engine> {
    BTreeMap::from([(FolderId::from(UNASSIGNED_FOLDER_ID), Engine::Langflow)])
}

fn default_static_workflows() -> BTreeMap<FolderId, Vec<Workflow>> {
    BTreeMap::from([
        (
            FolderId::from("marketing"),
            vec![
                Workflow::new("wf-3", "Lead Scoring", Engine::N8n),
                Workflow::new("wf-4", "Campaign Tracker", Engine::Langsmith),
            ],
        ),
        (
            FolderId::from("data-processing"),
            vec![
                Workflow::new("wf-5", "ETL Pipeline", Engine::Langflow),
                Workflow::new("wf-6", "Report Generator", Engine::N8n),
            ],
        ),
    ])
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            live_folders: default_live_folders(),
            static_workflows: default_static_workflows(),
            folders: default_folders(),
        }
    }
}

impl CatalogConfig {
    /// Engine feeding `folder`, if the folder is live.
    #[must_use]
    pub fn live_engine(&self, folder: &str) -> Option<Engine> {
        self.live_folders.get(folder).copied()
    }

    /// Static workflows of `folder`; empty when none are configured.
    #[must_use]
    pub fn static_workflows(&self, folder: &str) -> &[Workflow] {
        self.static_workflows
            .get(folder)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Engines that must be queried to populate `folders`.
    #[must_use]
    pub fn engines_for(&self, folders: &[Folder]) -> BTreeSet<Engine> {
        folders
            .iter()
            .filter_map(|folder| self.live_engine(folder.id.as_str()))
            .collect()
    }
}
