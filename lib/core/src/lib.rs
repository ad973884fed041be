//! Core types and utilities for the FlowBit orchestration console.
//!
//! This crate provides the prefixed ULID identifier types shared by the
//! dispatch, console and server crates.

pub mod id;

pub use id::{CronJobId, ParseIdError, WebhookId};
