//! Folders group workflows in the sidebar.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Id of the default folder that receives the live backend flows.
pub const UNASSIGNED_FOLDER_ID: &str = "unassigned";

/// Identifier of a folder. Folder ids are user-chosen slugs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderId(String);

impl FolderId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The default `unassigned` folder.
    #[must_use]
    pub fn unassigned() -> Self {
        Self(UNASSIGNED_FOLDER_ID.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_unassigned(&self) -> bool {
        self.0 == UNASSIGNED_FOLDER_ID
    }
}

impl Default for FolderId {
    fn default() -> Self {
        Self::unassigned()
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FolderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for FolderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for FolderId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A user-defined grouping bucket for workflows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    #[serde(default)]
    pub workflow_count: u32,
    #[serde(default)]
    pub is_default: bool,
}

impl Folder {
    /// Creates a non-default folder.
    #[must_use]
    pub fn new(id: impl Into<FolderId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            workflow_count: 0,
            is_default: false,
        }
    }

    /// Marks the folder as the default one.
    #[must_use]
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Name shown in the sidebar. The unassigned folder holds the document
    /// classification agents, so it is labelled after them.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.id.is_unassigned() {
            "Document Classification"
        } else {
            &self.name
        }
    }
}

/// Folders present before the user creates any of their own.
#[must_use]
pub fn default_folders() -> Vec<Folder> {
    vec![
        Folder::new(UNASSIGNED_FOLDER_ID, "Unassigned").as_default(),
        Folder::new("marketing", "Marketing Automation"),
        Folder::new("data-processing", "Data Processing"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unassigned_folder_is_relabelled() {
        let folder = Folder::new(UNASSIGNED_FOLDER_ID, "Unassigned");
        assert_eq!(folder.display_name(), "Document Classification");

        let folder = Folder::new("marketing", "Marketing Automation");
        assert_eq!(folder.display_name(), "Marketing Automation");
    }

    #[test]
    fn folder_wire_format_is_camel_case() {
        let folder: Folder = serde_json::from_str(
            r#"{"id":"marketing","name":"Marketing","workflowCount":2,"isDefault":false}"#,
        )
        .expect("deserialize");
        assert_eq!(folder.id, FolderId::from("marketing"));
        assert_eq!(folder.workflow_count, 2);

        let json = serde_json::to_value(&folder).expect("serialize");
        assert_eq!(json["workflowCount"], 2);
        assert_eq!(json["isDefault"], false);
    }

    #[test]
    fn default_folders_start_with_unassigned() {
        let folders = default_folders();
        assert!(folders[0].id.is_unassigned());
        assert!(folders[0].is_default);
        assert_eq!(folders.iter().filter(|f| f.is_default).count(), 1);
    }
}
