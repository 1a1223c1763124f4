//! Workflow execution report.

use crate::bridge::protocol::{BridgeFailure, ErrorKind};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Result of a completed step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    /// One-based step number.
    pub step: usize,
    /// Target document.
    pub file: String,
    /// Action tag.
    pub action: &'static str,
    /// Data returned by the step's endpoint.
    pub data: Value,
}

/// Failure detail of the aborting step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepFailure {
    /// One-based step number.
    pub step: usize,
    /// Target document.
    pub file: String,
    /// Action tag.
    pub action: &'static str,
    /// Failure classification.
    pub error_type: ErrorKind,
    /// Failure message.
    pub error: String,
    /// Actionable hint.
    pub debug_hint: String,
}

impl StepFailure {
    /// Builds the failure detail from a classified bridge failure.
    #[must_use]
    pub fn new(step: usize, file: &str, action: &'static str, failure: BridgeFailure) -> Self {
        Self {
            step,
            file: file.to_owned(),
            action,
            error_type: failure.error_type,
            error: failure.message,
            debug_hint: failure.debug_hint,
        }
    }
}

/// Outcome of one workflow run.
///
/// Steps after a failure are never run and earlier effects are not undone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowReport {
    /// Workflow name.
    pub workflow: String,
    /// Completed steps in order.
    pub completed: Vec<StepOutcome>,
    /// Aborting failure, if any.
    pub failure: Option<StepFailure>,
    /// Steps not run because of the failure.
    pub skipped: usize,
    /// Start time.
    pub started_at: DateTime<Utc>,
    /// End time.
    pub finished_at: DateTime<Utc>,
}

impl WorkflowReport {
    /// Returns whether every step completed.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}
