//! Dispatch table mapping endpoint paths to handlers.

use super::{
    handler::{EndpointHandler, HandlerContext},
    isolation::run_isolated,
};
use crate::{
    bridge::protocol::{BridgeFailure, BridgeResponse, ErrorKind},
    debug_filter::{ResponseShape, shape},
    host::session::HostSession,
};
use serde_json::{Value, json};
use std::{collections::BTreeMap, fmt, sync::Arc};
use thiserror::Error;

/// Errors raised while building a dispatch table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// Two registrations claimed the same path.
    #[error("endpoint path '{0}' is registered more than once")]
    DuplicatePath(String),

    /// The path does not start with `/`.
    #[error("endpoint path '{0}' must start with '/'")]
    InvalidPath(String),
}

impl DispatchError {
    /// Classifies the error for reporting.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicatePath(_) => ErrorKind::DuplicateToolName,
            Self::InvalidPath(_) => ErrorKind::ValidationError,
        }
    }
}

/// One server-side endpoint.
#[derive(Clone)]
pub struct EndpointRegistration {
    path: String,
    description: String,
    shape: ResponseShape,
    handler: Arc<dyn EndpointHandler>,
}

impl EndpointRegistration {
    /// Creates a registration with the standard response shape.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        description: impl Into<String>,
        handler: impl EndpointHandler + 'static,
    ) -> Self {
        Self {
            path: path.into(),
            description: description.into(),
            shape: ResponseShape::standard(),
            handler: Arc::new(handler),
        }
    }

    /// Replaces the response shape.
    #[must_use]
    pub const fn with_shape(mut self, shape: ResponseShape) -> Self {
        self.shape = shape;
        self
    }

    /// Returns the endpoint path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the endpoint description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the response shape.
    #[must_use]
    pub const fn shape(&self) -> &ResponseShape {
        &self.shape
    }
}

impl fmt::Debug for EndpointRegistration {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("EndpointRegistration")
            .field("path", &self.path)
            .field("description", &self.description)
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

/// Source of endpoint registrations, one per tool module.
pub trait EndpointModule {
    /// Returns the module name used in logs.
    fn module_name(&self) -> &'static str;

    /// Returns the endpoints this module serves.
    fn endpoints(&self) -> Vec<EndpointRegistration>;
}

/// Path-to-handler mapping of the bridge server.
#[derive(Debug, Default)]
pub struct DispatchTable {
    endpoints: BTreeMap<String, EndpointRegistration>,
}

impl DispatchTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from endpoint modules.
    ///
    /// # Errors
    ///
    /// Returns the first registration error.
    pub fn from_modules(modules: &[&dyn EndpointModule]) -> Result<Self, DispatchError> {
        let mut table = Self::new();
        for module in modules {
            let endpoints = module.endpoints();
            tracing::debug!(
                module = module.module_name(),
                count = endpoints.len(),
                "registering endpoints"
            );
            for registration in endpoints {
                table.register(registration)?;
            }
        }
        Ok(table)
    }

    /// Adds a registration.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::DuplicatePath`] when the path is taken and
    /// [`DispatchError::InvalidPath`] when it is not absolute.
    pub fn register(&mut self, registration: EndpointRegistration) -> Result<(), DispatchError> {
        if !registration.path.starts_with('/') {
            return Err(DispatchError::InvalidPath(registration.path));
        }
        if self.endpoints.contains_key(&registration.path) {
            return Err(DispatchError::DuplicatePath(registration.path));
        }
        self.endpoints
            .insert(registration.path.clone(), registration);
        Ok(())
    }

    /// Returns the registration for a path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&EndpointRegistration> {
        self.endpoints.get(path)
    }

    /// Returns every registered path in sorted order.
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        self.endpoints.keys().map(String::as_str).collect()
    }

    /// Counts registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Returns whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Describes the endpoints for `GET /info`.
    #[must_use]
    pub fn describe(&self) -> Vec<Value> {
        self.endpoints
            .values()
            .map(|registration| {
                json!({
                    "path": registration.path,
                    "method": "POST",
                    "description": registration.description,
                })
            })
            .collect()
    }

    /// Runs the handler registered for `path` inside the isolation boundary
    /// and shapes its output.
    ///
    /// Unknown paths produce an `EndpointNotFound` failure listing the
    /// available endpoints.
    pub fn dispatch(
        &self,
        session: &mut HostSession,
        path: &str,
        payload: &Value,
        verbose: bool,
    ) -> BridgeResponse {
        let Some(registration) = self.endpoints.get(path) else {
            tracing::warn!(path, "unknown endpoint");
            return BridgeResponse::Failure(
                BridgeFailure::new(ErrorKind::EndpointNotFound, format!("Unknown endpoint: {path}"))
                    .with_details(json!({"available_endpoints": self.paths()})),
            );
        };
        tracing::info!(path, "dispatching");
        let mut context = HandlerContext {
            session,
            endpoints: self,
            verbose,
        };
        match run_isolated(path, verbose, || {
            registration.handler.handle(&mut context, payload)
        }) {
            Ok(data) => BridgeResponse::Success {
                data: shape(data, &registration.shape, verbose),
            },
            Err(failure) => BridgeResponse::Failure(failure),
        }
    }
}
