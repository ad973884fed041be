//! Workflows as listed in the sidebar, and their grouping by folder.

use crate::engine::Engine;
use crate::folder::{Folder, FolderId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A workflow that lives on one of the engines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    pub id: String,
    pub name: String,
    pub engine: Engine,
}

impl Workflow {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, engine: Engine) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            engine,
        }
    }
}

/// A flow as reported by an engine backend. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendFlow {
    pub id: String,
    pub name: String,
}

impl BackendFlow {
    /// Tags the flow with the engine it came from.
    #[must_use]
    pub fn tag(self, engine: Engine) -> Workflow {
        Workflow {
            id: self.id,
            name: self.name,
            engine,
        }
    }
}

/// Workflows partitioned by folder id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderWorkflows(BTreeMap<FolderId, Vec<Workflow>>);

impl FolderWorkflows {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the workflows of a folder.
    pub fn insert(&mut self, folder: FolderId, workflows: Vec<Workflow>) {
        self.0.insert(folder, workflows);
    }

    /// Workflows of a folder; unknown folders have none.
    #[must_use]
    pub fn for_folder(&self, folder: &str) -> &[Workflow] {
        self.0.get(folder).map(Vec::as_slice).unwrap_or_default()
    }

    /// Sum of the per-folder counts over `folders`.
    #[must_use]
    pub fn total_for(&self, folders: &[Folder]) -> usize {
        folders
            .iter()
            .map(|folder| self.for_folder(folder.id.as_str()).len())
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FolderId, &Vec<Workflow>)> {
        self.0.iter()
    }
}

impl FromIterator<(FolderId, Vec<Workflow>)> for FolderWorkflows {
    fn from_iter<I: IntoIterator<Item = (FolderId, Vec<Workflow>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
