//! Handler faults and their conversion into wire failures.

use crate::{
    bridge::protocol::{BridgeFailure, ErrorKind},
    eml::domain::EmlError,
    host::domain::HostError,
    workflow::domain::WorkflowError,
};
use serde_json::Value;
use std::panic::Location;

/// A classified failure raised by an endpoint handler.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerFault {
    kind: ErrorKind,
    exception_type: String,
    message: String,
    location: String,
    hint: Option<String>,
    details: Option<Value>,
}

/// Result type returned by endpoint handlers.
pub type HandlerResult = Result<Value, HandlerFault>;

impl HandlerFault {
    /// Creates a fault recording the caller's source location.
    #[must_use]
    #[track_caller]
    pub fn new(kind: ErrorKind, exception_type: impl Into<String>, message: impl Into<String>) -> Self {
        let caller = Location::caller();
        Self {
            kind,
            exception_type: exception_type.into(),
            message: message.into(),
            location: format!("{}:{}", caller.file(), caller.line()),
            hint: None,
            details: None,
        }
    }

    /// Creates a validation fault for bad handler arguments.
    #[must_use]
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValidationError, "InvalidArgument", message)
    }

    /// Attaches an actionable hint replacing the kind default.
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Attaches structured details.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Returns the failure classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Converts the fault into a wire failure. The trace is attached only
    /// in verbose mode.
    #[must_use]
    pub fn into_failure(self, verbose: bool) -> BridgeFailure {
        let trace = verbose.then(|| {
            format!(
                "{}: {}\n  at {}",
                self.exception_type, self.message, self.location
            )
        });
        let mut failure = BridgeFailure::new(self.kind, self.message);
        if let Some(hint) = self.hint {
            failure = failure.with_hint(hint);
        }
        failure.exception_type = Some(self.exception_type);
        failure.file_line = Some(self.location);
        failure.trace = trace;
        failure.details = self.details;
        failure
    }
}

impl From<EmlError> for HandlerFault {
    #[track_caller]
    fn from(error: EmlError) -> Self {
        Self::new(error.kind(), "EmlError", error.to_string())
    }
}

impl From<HostError> for HandlerFault {
    #[track_caller]
    fn from(error: HostError) -> Self {
        Self::new(error.kind(), "HostError", error.to_string())
    }
}

impl From<WorkflowError> for HandlerFault {
    #[track_caller]
    fn from(error: WorkflowError) -> Self {
        Self::new(error.kind(), "WorkflowError", error.to_string())
    }
}
