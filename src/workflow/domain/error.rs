//! Error types for workflow loading and lookup.

use crate::bridge::protocol::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned while loading or selecting workflows.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// The workflow file could not be read.
    #[error("failed to read workflow file {path}: {message}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },

    /// The document is not valid YAML or JSON for the workflow format.
    #[error("invalid workflow {format}: {message}")]
    Parse {
        /// Input format.
        format: &'static str,
        /// Parser message.
        message: String,
    },

    /// Two workflows share a name.
    #[error("workflow '{0}' is declared more than once")]
    DuplicateWorkflow(String),

    /// A workflow has no steps.
    #[error("workflow '{0}' has no steps")]
    EmptyWorkflow(String),

    /// A step targets a file missing from `files`.
    #[error("step {step} of workflow '{workflow}' targets undeclared file '{file}'")]
    UndeclaredFile {
        /// Workflow name.
        workflow: String,
        /// One-based step number.
        step: usize,
        /// Offending file name.
        file: String,
    },

    /// No workflow has the requested name.
    #[error("workflow '{name}' not found; available: {available:?}")]
    WorkflowNotFound {
        /// Requested name.
        name: String,
        /// Declared workflow names.
        available: Vec<String>,
    },
}

impl WorkflowError {
    /// Classifies the error for reporting.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::ValidationError
    }
}

/// Result type for workflow loading.
pub type WorkflowResult<T> = Result<T, WorkflowError>;
