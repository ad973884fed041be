//! Dispatch of workflow triggers to external engines.
//!
//! The console never executes a workflow. It builds trigger requests and
//! cron-job registrations, hands them to an engine backend, and reads run
//! records back.

pub mod client;
pub mod cron;
pub mod error;
pub mod run;
pub mod trigger;
pub mod webhook;

pub use client::{HttpTriggerBackend, TriggerBackend};
pub use cron::{CronJob, CronSchedule, validate_cron_expression};
pub use error::DispatchError;
pub use run::{BackendRun, PlaceholderRuns, RECENT_RUNS_LIMIT, RunRecord, RunSource, RunStatus};
pub use trigger::{TriggerAck, TriggerRequest, TriggerType};
pub use webhook::{WebhookTarget, engine_webhook_url};
