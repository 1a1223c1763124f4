//! Wire protocol shared by the bridge client and server.
//!
//! A request is a JSON payload posted to an endpoint path. A response is a
//! JSON object whose `success` flag selects between a data payload and a
//! classified failure.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;

/// Classification of every failure that crosses the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The peer could not be reached.
    ConnectionError,
    /// The bounded wait for a response expired.
    Timeout,
    /// The response was not a well-formed bridge payload.
    ProtocolError,
    /// A handler failed inside the isolation boundary.
    HandlerError,
    /// No tool with the requested name is registered.
    ToolNotFound,
    /// No handler is registered for the requested path.
    EndpointNotFound,
    /// A value could not be converted to the destination type.
    IncompatibleGeometryType,
    /// Input or destination constraints rejected the request.
    ValidationError,
    /// Two tools or endpoints claimed the same name.
    DuplicateToolName,
}

impl ErrorKind {
    /// Returns the wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConnectionError => "ConnectionError",
            Self::Timeout => "Timeout",
            Self::ProtocolError => "ProtocolError",
            Self::HandlerError => "HandlerError",
            Self::ToolNotFound => "ToolNotFound",
            Self::EndpointNotFound => "EndpointNotFound",
            Self::IncompatibleGeometryType => "IncompatibleGeometryType",
            Self::ValidationError => "ValidationError",
            Self::DuplicateToolName => "DuplicateToolName",
        }
    }

    /// Returns a short actionable hint for the kind.
    #[must_use]
    pub const fn default_hint(self) -> &'static str {
        match self {
            Self::ConnectionError => {
                "Make sure the bridge server is running inside the host and the host and port settings match."
            }
            Self::Timeout => {
                "The host did not answer in time. The operation may still complete; check the host before retrying."
            }
            Self::ProtocolError => {
                "The bridge returned a malformed response. The server process may have crashed; check its log."
            }
            Self::HandlerError => {
                "The host raised an error while running the handler. Enable DEBUG_MODE for a trace."
            }
            Self::ToolNotFound => "List the registered tools and check the spelling of the tool name.",
            Self::EndpointNotFound => {
                "The endpoint is not registered on the bridge server. Check that client and server catalogs match."
            }
            Self::IncompatibleGeometryType => {
                "The source value cannot be converted to the destination type. Pick a compatible parameter pair."
            }
            Self::ValidationError => "Check the arguments against the tool's parameter schema and constraints.",
            Self::DuplicateToolName => "Two modules register the same tool name. Rename one of them.",
        }
    }

    /// Returns the HTTP status used when a server reports this kind.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::ToolNotFound | Self::EndpointNotFound => 404,
            Self::ValidationError | Self::IncompatibleGeometryType => 422,
            Self::ConnectionError => 502,
            Self::Timeout => 504,
            Self::ProtocolError | Self::HandlerError | Self::DuplicateToolName => 500,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A classified failure reported across the bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeFailure {
    /// Failure classification.
    pub error_type: ErrorKind,
    /// Human-readable message. Read from `message` or `error`.
    #[serde(alias = "error")]
    pub message: String,
    /// Short actionable hint.
    pub debug_hint: String,
    /// Name of the underlying error or panic type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception_type: Option<String>,
    /// Source location of the failure, best effort.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_line: Option<String>,
    /// Diagnostic trace, present in verbose mode only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
    /// Kind-specific structured details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl BridgeFailure {
    /// Creates a failure with the default hint for `kind`.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            error_type: kind,
            message: message.into(),
            debug_hint: kind.default_hint().to_owned(),
            exception_type: None,
            file_line: None,
            trace: None,
            details: None,
        }
    }

    /// Replaces the hint.
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.debug_hint = hint.into();
        self
    }

    /// Attaches structured details.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl fmt::Display for BridgeFailure {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.error_type, self.message)
    }
}

/// A request posted to the bridge server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeRequest {
    path: String,
    payload: Value,
}

impl BridgeRequest {
    /// Creates a request. A missing leading `/` is added to the path.
    #[must_use]
    pub fn new(path: impl Into<String>, payload: Value) -> Self {
        let raw = path.into();
        let path = if raw.starts_with('/') {
            raw
        } else {
            format!("/{raw}")
        };
        Self { path, payload }
    }

    /// Returns the endpoint path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the JSON payload.
    #[must_use]
    pub const fn payload(&self) -> &Value {
        &self.payload
    }

    /// Consumes the request, returning the payload.
    #[must_use]
    pub fn into_payload(self) -> Value {
        self.payload
    }
}

/// Tagged result of one bridge call.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeResponse {
    /// The handler succeeded.
    Success {
        /// Handler output.
        data: Value,
    },
    /// The call failed.
    Failure(BridgeFailure),
}

impl BridgeResponse {
    /// Returns the HTTP status for this response.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::Success { .. } => 200,
            Self::Failure(failure) => failure.error_type.http_status(),
        }
    }

    /// Renders the wire body.
    #[must_use]
    pub fn into_json(self) -> Value {
        match self {
            Self::Success { data } => json!({"success": true, "data": data}),
            Self::Failure(failure) => {
                let mut body = Map::new();
                body.insert("success".to_owned(), Value::Bool(false));
                body.insert(
                    "error_type".to_owned(),
                    Value::String(failure.error_type.as_str().to_owned()),
                );
                body.insert("message".to_owned(), Value::String(failure.message.clone()));
                body.insert("error".to_owned(), Value::String(failure.message));
                body.insert("debug_hint".to_owned(), Value::String(failure.debug_hint));
                let optional = [
                    ("exception_type", failure.exception_type.map(Value::String)),
                    ("file_line", failure.file_line.map(Value::String)),
                    ("trace", failure.trace.map(Value::String)),
                    ("details", failure.details),
                ];
                for (key, value) in optional {
                    if let Some(present) = value {
                        body.insert(key.to_owned(), present);
                    }
                }
                Value::Object(body)
            }
        }
    }

    /// Parses a wire body.
    ///
    /// A success body without a `data` key is accepted; its remaining keys
    /// become the data.
    ///
    /// # Errors
    ///
    /// Returns a description of the violation when the body is not an
    /// object, lacks a boolean `success`, or carries a malformed failure.
    pub fn from_json(body: Value) -> Result<Self, String> {
        let mut object = match body {
            Value::Object(object) => object,
            other => return Err(format!("response body is not a JSON object: {other}")),
        };
        match object.remove("success") {
            Some(Value::Bool(true)) => Ok(Self::Success {
                data: object
                    .remove("data")
                    .unwrap_or_else(|| Value::Object(object)),
            }),
            Some(Value::Bool(false)) => {
                if object.contains_key("message") {
                    object.remove("error");
                }
                serde_json::from_value(Value::Object(object))
                    .map(Self::Failure)
                    .map_err(|error| format!("malformed failure payload: {error}"))
            }
            Some(other) => Err(format!("`success` must be a boolean, got {other}")),
            None => Err("response lacks the `success` key".to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BridgeFailure, BridgeRequest, BridgeResponse, ErrorKind};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("draw_line", "/draw_line")]
    #[case("/draw_line", "/draw_line")]
    fn request_paths_are_absolute(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(BridgeRequest::new(raw, json!({})).path(), expected);
    }

    #[rstest]
    fn failure_body_carries_message_and_error_keys() {
        let body = BridgeResponse::Failure(BridgeFailure::new(
            ErrorKind::EndpointNotFound,
            "Unknown endpoint: /nope",
        ))
        .into_json();
        assert_eq!(body.get("success"), Some(&json!(false)));
        assert_eq!(body.get("error_type"), Some(&json!("EndpointNotFound")));
        assert_eq!(body.get("message"), Some(&json!("Unknown endpoint: /nope")));
        assert_eq!(body.get("error"), Some(&json!("Unknown endpoint: /nope")));
        assert!(body.get("trace").is_none());
    }

    #[rstest]
    #[case::message_key(json!({
        "success": false,
        "error_type": "ValidationError",
        "message": "bad",
        "debug_hint": "h",
    }))]
    #[case::error_key(json!({
        "success": false,
        "error_type": "ValidationError",
        "error": "bad",
        "debug_hint": "h",
    }))]
    fn failure_bodies_accept_either_message_key(#[case] body: serde_json::Value) {
        let parsed = BridgeResponse::from_json(body);
        assert_eq!(
            parsed,
            Ok(BridgeResponse::Failure(
                BridgeFailure::new(ErrorKind::ValidationError, "bad").with_hint("h")
            ))
        );
    }

    #[rstest]
    fn failure_body_parses_back() {
        let failure = BridgeFailure::new(ErrorKind::ValidationError, "bad value")
            .with_details(json!({"parameter": "eml_input_x"}));
        let parsed = BridgeResponse::from_json(BridgeResponse::Failure(failure.clone()).into_json());
        assert_eq!(parsed, Ok(BridgeResponse::Failure(failure)));
    }

    #[rstest]
    fn success_without_data_key_keeps_remaining_fields() {
        let parsed = BridgeResponse::from_json(json!({"success": true, "message": "hi"}));
        assert_eq!(
            parsed,
            Ok(BridgeResponse::Success {
                data: json!({"message": "hi"})
            })
        );
    }

    #[rstest]
    #[case(json!([1, 2]))]
    #[case(json!({"message": "no flag"}))]
    #[case(json!({"success": "yes"}))]
    #[case(json!({"success": false, "error": "missing kind"}))]
    fn malformed_bodies_are_rejected(#[case] body: serde_json::Value) {
        assert!(BridgeResponse::from_json(body).is_err());
    }

    #[rstest]
    #[case(ErrorKind::EndpointNotFound, 404)]
    #[case(ErrorKind::ValidationError, 422)]
    #[case(ErrorKind::HandlerError, 500)]
    fn kinds_map_to_http_statuses(#[case] kind: ErrorKind, #[case] status: u16) {
        assert_eq!(kind.http_status(), status);
    }
}
