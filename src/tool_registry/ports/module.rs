//! Tool module port: sources of tool declarations.

use crate::tool_registry::domain::{ToolDescriptor, ToolRegistryResult};
use serde_json::Value;
use thiserror::Error;

/// Failure reported by a local tool.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct LocalToolError {
    message: String,
}

impl LocalToolError {
    /// Creates a local tool failure.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Function executing a local tool on validated arguments.
pub type LocalToolFn = fn(&Value) -> Result<Value, LocalToolError>;

/// How a tool is executed.
#[derive(Debug, Clone, Copy)]
pub enum ToolBinding {
    /// Sent over the bridge to the descriptor's endpoint.
    Bridge,
    /// Executed in-process.
    Local(LocalToolFn),
}

/// A descriptor paired with its binding.
#[derive(Debug, Clone)]
pub struct ToolDeclaration {
    descriptor: ToolDescriptor,
    binding: ToolBinding,
}

impl ToolDeclaration {
    /// Declares a tool served by the bridge.
    #[must_use]
    pub const fn bridge(descriptor: ToolDescriptor) -> Self {
        Self {
            descriptor,
            binding: ToolBinding::Bridge,
        }
    }

    /// Declares a tool executed in the agent process.
    #[must_use]
    pub const fn local(descriptor: ToolDescriptor, function: LocalToolFn) -> Self {
        Self {
            descriptor,
            binding: ToolBinding::Local(function),
        }
    }

    /// Returns the descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    /// Returns the binding.
    #[must_use]
    pub const fn binding(&self) -> ToolBinding {
        self.binding
    }
}

/// Source of tool declarations, consulted once at registry build time.
pub trait ToolModule {
    /// Short module name used in logs.
    fn module_name(&self) -> &'static str;

    /// Returns the tools this module provides.
    ///
    /// # Errors
    ///
    /// Returns a registry error when a descriptor is invalid.
    fn tools(&self) -> ToolRegistryResult<Vec<ToolDeclaration>>;
}
