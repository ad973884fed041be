//! UI state for the FlowBit console.
//!
//! Both the sidebar and the trigger composer keep their state in plain
//! structs that change only through `apply(action)`. Components own one
//! state value each and render from it; nothing here touches the DOM.

pub mod composer;
pub mod error;
pub mod sidebar;

pub use composer::{
    ComposerAction, ComposerEffect, ComposerForm, ComposerState, DEFAULT_MANUAL_PAYLOAD,
    SubmitOutcome, schedule_job, submit_trigger,
};
pub use error::ComposerError;
pub use sidebar::{FolderNode, SidebarAction, SidebarEvent, SidebarState, SidebarView, WorkflowBadge};
