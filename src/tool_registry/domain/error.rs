//! Error types for tool registration and lookup.

use super::ToolName;
use crate::bridge::protocol::ErrorKind;
use thiserror::Error;

/// Errors returned while building or querying the tool registry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ToolRegistryError {
    /// The tool name is empty after trimming.
    #[error("tool name must not be empty")]
    EmptyToolName,

    /// The tool name contains characters outside `[a-z0-9_]`.
    #[error(
        "tool name '{0}' contains invalid characters (only lowercase alphanumeric and underscores allowed)"
    )]
    InvalidToolName(String),

    /// The tool name exceeds the 64-character limit.
    #[error("tool name exceeds 64 character limit: {0}")]
    ToolNameTooLong(String),

    /// A tool description is empty after trimming.
    #[error("tool '{0}' must have a description")]
    EmptyDescription(ToolName),

    /// A server-side endpoint path does not start with `/`.
    #[error("tool '{tool}' declares endpoint '{endpoint}', which must start with '/'")]
    InvalidEndpoint {
        /// Tool name.
        tool: ToolName,
        /// Declared endpoint.
        endpoint: String,
    },

    /// The binding does not match the side the descriptor declares.
    #[error("tool '{0}' is bound to the wrong side of the bridge")]
    BindingMismatch(ToolName),

    /// Two declarations claimed the same name.
    #[error("tool '{0}' is registered more than once")]
    DuplicateToolName(ToolName),

    /// No tool is registered under the requested name.
    #[error("tool '{0}' is not registered")]
    ToolNotFound(String),

    /// Arguments were not a JSON object.
    #[error("arguments for tool '{0}' must be a JSON object")]
    ArgumentsNotObject(ToolName),

    /// A required argument is absent.
    #[error("tool '{tool}' requires argument '{parameter}'")]
    MissingArgument {
        /// Tool name.
        tool: ToolName,
        /// Parameter name.
        parameter: String,
    },

    /// An argument has the wrong JSON type.
    #[error("argument '{parameter}' of tool '{tool}' must be {expected}")]
    InvalidArgument {
        /// Tool name.
        tool: ToolName,
        /// Parameter name.
        parameter: String,
        /// Expected JSON type.
        expected: &'static str,
    },

    /// An argument is not declared by the tool.
    #[error("tool '{tool}' has no parameter '{parameter}'")]
    UnknownArgument {
        /// Tool name.
        tool: ToolName,
        /// Parameter name.
        parameter: String,
    },
}

impl ToolRegistryError {
    /// Classifies the error for reporting.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateToolName(_) => ErrorKind::DuplicateToolName,
            Self::ToolNotFound(_) => ErrorKind::ToolNotFound,
            _ => ErrorKind::ValidationError,
        }
    }
}

/// Result type for tool registry operations.
pub type ToolRegistryResult<T> = Result<T, ToolRegistryError>;
