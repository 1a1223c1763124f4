//! Endpoint handler contract.

use super::{dispatch::DispatchTable, fault::HandlerFault, fault::HandlerResult};
use crate::host::session::HostSession;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Everything a handler may touch while it runs.
///
/// The session is borrowed exclusively, so no two handlers observe or
/// mutate the host at the same time.
pub struct HandlerContext<'a> {
    /// Host session with the active document.
    pub session: &'a mut HostSession,
    /// Dispatch table, for handlers that dispatch other endpoints.
    pub endpoints: &'a DispatchTable,
    /// Whether the current response is verbose.
    pub verbose: bool,
}

impl std::fmt::Debug for HandlerContext<'_> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("HandlerContext")
            .field("session", &self.session)
            .field("endpoints", &self.endpoints.len())
            .field("verbose", &self.verbose)
            .finish()
    }
}

/// Server-side function executing one remote operation.
pub trait EndpointHandler: Send + Sync {
    /// Handles a request payload.
    ///
    /// # Errors
    ///
    /// Returns a [`HandlerFault`] describing the failure.
    fn handle(&self, context: &mut HandlerContext<'_>, payload: &Value) -> HandlerResult;
}

impl<F> EndpointHandler for F
where
    F: Fn(&mut HandlerContext<'_>, &Value) -> HandlerResult + Send + Sync,
{
    fn handle(&self, context: &mut HandlerContext<'_>, payload: &Value) -> HandlerResult {
        self(context, payload)
    }
}

/// Typed accessors over a request payload.
#[derive(Debug, Clone, Copy)]
pub struct Arguments<'a> {
    payload: &'a Value,
}

impl<'a> Arguments<'a> {
    /// Wraps a payload.
    #[must_use]
    pub const fn new(payload: &'a Value) -> Self {
        Self { payload }
    }

    /// Returns a value if present and not null.
    #[must_use]
    pub fn optional(&self, key: &str) -> Option<&'a Value> {
        self.payload.get(key).filter(|value| !value.is_null())
    }

    /// Returns a required value.
    ///
    /// # Errors
    ///
    /// Returns a validation fault when the key is missing.
    #[track_caller]
    pub fn required(&self, key: &str) -> Result<&'a Value, HandlerFault> {
        self.optional(key)
            .ok_or_else(|| HandlerFault::validation(format!("missing required argument '{key}'")))
    }

    /// Returns an optional, non-blank string argument.
    ///
    /// # Errors
    ///
    /// Returns a validation fault when the value is not a string.
    #[track_caller]
    pub fn optional_str(&self, key: &str) -> Result<Option<&'a str>, HandlerFault> {
        match self.optional(key) {
            None => Ok(None),
            Some(Value::String(text)) if text.trim().is_empty() => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.as_str())),
            Some(other) => Err(HandlerFault::validation(format!(
                "argument '{key}' must be a string, got {other}"
            ))),
        }
    }

    /// Returns a required string argument.
    ///
    /// # Errors
    ///
    /// Returns a validation fault when the key is missing, blank, or not a
    /// string.
    #[track_caller]
    pub fn required_str(&self, key: &str) -> Result<&'a str, HandlerFault> {
        self.optional_str(key)?
            .ok_or_else(|| HandlerFault::validation(format!("missing required argument '{key}'")))
    }

    /// Returns a required numeric argument.
    ///
    /// # Errors
    ///
    /// Returns a validation fault when the key is missing or not a number.
    #[track_caller]
    pub fn required_f64(&self, key: &str) -> Result<f64, HandlerFault> {
        let value = self.required(key)?;
        value.as_f64().ok_or_else(|| {
            HandlerFault::validation(format!("argument '{key}' must be a number, got {value}"))
        })
    }

    /// Deserializes the whole payload.
    ///
    /// # Errors
    ///
    /// Returns a validation fault when the payload does not match `T`.
    #[track_caller]
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, HandlerFault> {
        T::deserialize(self.payload)
            .map_err(|error| HandlerFault::validation(format!("invalid arguments: {error}")))
    }
}
