//! Workflow catalog for the FlowBit console.
//!
//! This crate provides:
//!
//! - **Engines**: the external automation platforms workflows run on
//! - **Folders**: user-defined buckets that group workflows in the sidebar
//! - **Catalog configuration**: which folders are fed live from an engine and
//!   which come from a static table
//! - **Workflow fetcher**: reads flows from engine backends and partitions
//!   them across folders

pub mod catalog;
pub mod engine;
pub mod error;
pub mod fetcher;
pub mod folder;
pub mod workflow;

pub use catalog::CatalogConfig;
pub use engine::{Engine, EngineProfile};
pub use error::CatalogError;
pub use fetcher::{FlowSource, HttpFlowSource, WorkflowFetcher};
pub use folder::{Folder, FolderId, UNASSIGNED_FOLDER_ID};
pub use workflow::{BackendFlow, FolderWorkflows, Workflow};
