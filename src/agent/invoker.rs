//! Tool invocation service.

use crate::{
    bridge::{
        client::{BridgeClientError, BridgeTransport},
        protocol::{BridgeFailure, BridgeRequest, BridgeResponse, ErrorKind},
    },
    config::VerbosityFlag,
    debug_filter::shape,
    tool_registry::{
        domain::{ToolName, ToolRegistryError},
        ports::{ToolBinding, ToolDeclaration},
        services::ToolRegistry,
    },
};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned while invoking a tool.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InvocationError {
    /// The tool is unknown or its arguments are invalid.
    #[error(transparent)]
    Registry(#[from] ToolRegistryError),
    /// The bridge call failed.
    #[error(transparent)]
    Bridge(#[from] BridgeClientError),
    /// A local tool reported a failure.
    #[error("tool '{tool}' failed: {message}")]
    Local {
        /// Tool name.
        tool: ToolName,
        /// Failure message.
        message: String,
    },
}

impl InvocationError {
    /// Returns the failure classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Registry(error) => error.kind(),
            Self::Bridge(error) => error.kind(),
            Self::Local { .. } => ErrorKind::HandlerError,
        }
    }

    /// Converts the error into a classified failure payload.
    #[must_use]
    pub fn into_failure(self) -> BridgeFailure {
        match self {
            Self::Bridge(error) => error.into_failure(),
            other => BridgeFailure::new(other.kind(), other.to_string()),
        }
    }
}

/// Result type for tool invocation.
pub type InvocationResult<T> = Result<T, InvocationError>;

/// Resolves and runs tools on behalf of an agent.
#[derive(Debug, Clone)]
pub struct ToolInvoker<T> {
    registry: Arc<ToolRegistry>,
    transport: T,
    verbosity: VerbosityFlag,
}

impl<T> ToolInvoker<T>
where
    T: BridgeTransport,
{
    /// Creates an invoker over a registry and a bridge transport.
    #[must_use]
    pub const fn new(registry: Arc<ToolRegistry>, transport: T, verbosity: VerbosityFlag) -> Self {
        Self {
            registry,
            transport,
            verbosity,
        }
    }

    /// Returns the registry.
    #[must_use]
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Invokes a tool and returns its shaped output.
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError`] when the tool is unknown, arguments are
    /// invalid, or execution fails. No call is retried.
    pub async fn invoke(&self, name: &str, arguments: Value) -> InvocationResult<Value> {
        let declaration = self.registry.resolve(name)?;
        let descriptor = declaration.descriptor();
        descriptor.validate_arguments(&arguments)?;
        tracing::info!(tool = %descriptor.name(), side = %descriptor.side(), "invoking tool");

        let raw = self.execute(declaration, arguments).await?;
        Ok(shape(raw, descriptor.shape(), self.verbosity.is_verbose()))
    }

    /// Invokes a tool and always returns a structured payload: the success
    /// envelope, or a classified failure with a hint.
    pub async fn invoke_payload(&self, name: &str, arguments: Value) -> Value {
        let response = match self.invoke(name, arguments).await {
            Ok(data) => BridgeResponse::Success { data },
            Err(error) => {
                tracing::warn!(tool = name, kind = %error.kind(), error = %error, "tool failed");
                BridgeResponse::Failure(error.into_failure())
            }
        };
        response.into_json()
    }

    async fn execute(
        &self,
        declaration: &ToolDeclaration,
        arguments: Value,
    ) -> InvocationResult<Value> {
        let descriptor = declaration.descriptor();
        match declaration.binding() {
            ToolBinding::Local(function) => {
                function(&arguments).map_err(|error| InvocationError::Local {
                    tool: descriptor.name().clone(),
                    message: error.message().to_owned(),
                })
            }
            ToolBinding::Bridge => {
                let endpoint = descriptor
                    .endpoint()
                    .ok_or_else(|| ToolRegistryError::BindingMismatch(descriptor.name().clone()))?;
                let request = BridgeRequest::new(endpoint, arguments);
                Ok(self.transport.send(request).await?)
            }
        }
    }
}
