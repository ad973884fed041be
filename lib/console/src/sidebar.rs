//! Sidebar state: expanded folders, loaded workflows, selection.

use flowbit_catalog::{Engine, Folder, FolderId, FolderWorkflows, Workflow};
use std::collections::BTreeSet;

/// A change to the sidebar state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarAction {
    /// Expands a collapsed folder or collapses an expanded one.
    ToggleFolder(FolderId),
    /// Selects a folder; `None` selects "All Workflows".
    SelectFolder(Option<FolderId>),
    /// A workflow fetch finished.
    WorkflowsLoaded(FolderWorkflows),
}

/// Something the sidebar's owner has to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarEvent {
    FolderSelected(Option<FolderId>),
}

/// State behind the folder tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarState {
    expanded: BTreeSet<FolderId>,
    workflows: FolderWorkflows,
    loading: bool,
    selected: Option<FolderId>,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self {
            expanded: BTreeSet::from([FolderId::unassigned()]),
            workflows: FolderWorkflows::default(),
            loading: true,
            selected: None,
        }
    }
}

impl SidebarState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an action, returning the event to forward upward, if any.
    pub fn apply(&mut self, action: SidebarAction) -> Option<SidebarEvent> {
        match action {
            SidebarAction::ToggleFolder(id) => {
                if !self.expanded.remove(&id) {
                    self.expanded.insert(id);
                }
                None
            }
            SidebarAction::SelectFolder(id) => {
                self.selected = id.clone();
                Some(SidebarEvent::FolderSelected(id))
            }
            SidebarAction::WorkflowsLoaded(workflows) => {
                self.workflows = workflows;
                self.loading = false;
                None
            }
        }
    }

    #[must_use]
    pub fn is_expanded(&self, folder: &str) -> bool {
        self.expanded.contains(folder)
    }

    #[must_use]
    pub fn expanded(&self) -> &BTreeSet<FolderId> {
        &self.expanded
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn workflows(&self) -> &FolderWorkflows {
        &self.workflows
    }

    /// Derives what the tree shows for `folders`.
    #[must_use]
    pub fn view(&self, folders: &[Folder]) -> SidebarView {
        let nodes = folders
            .iter()
            .map(|folder| {
                let workflows = self.workflows.for_folder(folder.id.as_str());
                FolderNode {
                    id: folder.id.clone(),
                    label: folder.display_name().to_string(),
                    expanded: self.is_expanded(folder.id.as_str()),
                    active: self.selected.as_ref() == Some(&folder.id),
                    workflow_count: workflows.len(),
                    workflows: workflows.iter().map(WorkflowBadge::from).collect(),
                }
            })
            .collect();

        SidebarView {
            total_workflows: self.workflows.total_for(folders),
            all_selected: self.selected.is_none(),
            loading: self.loading,
            folders: nodes,
        }
    }
}

/// Render-ready sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarView {
    pub total_workflows: usize,
    /// Whether "All Workflows" is the active entry.
    pub all_selected: bool,
    pub loading: bool,
    pub folders: Vec<FolderNode>,
}

/// One folder of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderNode {
    pub id: FolderId,
    pub label: String,
    pub expanded: bool,
    pub active: bool,
    pub workflow_count: usize,
    pub workflows: Vec<WorkflowBadge>,
}

/// A workflow entry with its engine badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowBadge {
    pub id: String,
    pub name: String,
    pub engine: Engine,
    pub badge_class: &'static str,
}

impl From<&Workflow> for WorkflowBadge {
    fn from(workflow: &Workflow) -> Self {
        Self {
            id: workflow.id.clone(),
            name: workflow.name.clone(),
            engine: workflow.engine,
            badge_class: workflow.engine.badge_class(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folders() -> Vec<Folder> {
        vec![
            Folder::new("unassigned", "Unassigned").as_default(),
            Folder::new("marketing", "Marketing Automation"),
        ]
    }

    fn loaded() -> FolderWorkflows {
        [
            (
                FolderId::from("unassigned"),
                vec![
                    Workflow::new("email", "Email Agent", Engine::Langflow),
                    Workflow::new("pdf", "PDF Agent", Engine::Langflow),
                ],
            ),
            (
                FolderId::from("marketing"),
                vec![Workflow::new("wf-3", "Lead Scoring", Engine::N8n)],
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn starts_loading_with_unassigned_expanded() {
        let state = SidebarState::new();
        assert!(state.is_loading());
        assert!(state.is_expanded("unassigned"));
        assert_eq!(state.expanded().len(), 1);
    }

    #[test]
    fn toggle_twice_restores_expanded_set() {
        let mut state = SidebarState::new();
        let before = state.expanded().clone();

        state.apply(SidebarAction::ToggleFolder(FolderId::from("marketing")));
        assert!(state.is_expanded("marketing"));
        state.apply(SidebarAction::ToggleFolder(FolderId::from("marketing")));
        assert_eq!(state.expanded(), &before);

        state.apply(SidebarAction::ToggleFolder(FolderId::unassigned()));
        assert!(!state.is_expanded("unassigned"));
        state.apply(SidebarAction::ToggleFolder(FolderId::unassigned()));
        assert_eq!(state.expanded(), &before);
    }

    #[test]
    fn selection_is_forwarded() {
        let mut state = SidebarState::new();

        let event = state.apply(SidebarAction::SelectFolder(Some(FolderId::from("marketing"))));
        assert_eq!(
            event,
            Some(SidebarEvent::FolderSelected(Some(FolderId::from("marketing"))))
        );

        let event = state.apply(SidebarAction::SelectFolder(None));
        assert_eq!(event, Some(SidebarEvent::FolderSelected(None)));
        assert!(state.view(&folders()).all_selected);
    }

    #[test]
    fn view_counts_and_badges() {
        let mut state = SidebarState::new();
        state.apply(SidebarAction::WorkflowsLoaded(loaded()));
        state.apply(SidebarAction::SelectFolder(Some(FolderId::from("marketing"))));

        let view = state.view(&folders());

        assert!(!view.loading);
        assert_eq!(view.total_workflows, 3);
        assert_eq!(view.folders[0].label, "Document Classification");
        assert!(view.folders[0].expanded);
        assert_eq!(view.folders[0].workflow_count, 2);
        assert!(!view.folders[1].expanded);
        assert!(view.folders[1].active);
        assert_eq!(view.folders[1].workflows[0].badge_class, "bg-blue-100 text-blue-800");
    }

    #[test]
    fn empty_load_ends_loading_with_zero_total() {
        let mut state = SidebarState::new();
        state.apply(SidebarAction::WorkflowsLoaded(FolderWorkflows::default()));

        let view = state.view(&folders());

        assert!(!view.loading);
        assert_eq!(view.total_workflows, 0);
        assert!(view.folders.iter().all(|f| f.workflows.is_empty()));
    }
}
