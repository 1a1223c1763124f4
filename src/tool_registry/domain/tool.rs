//! Tool descriptor value object.

use super::{ToolName, ToolRegistryError, ToolRegistryResult};
use crate::debug_filter::ResponseShape;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;

/// Side of the bridge a tool executes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolSide {
    /// Runs in the agent process without touching the bridge.
    Client,
    /// Runs inside the host behind an endpoint.
    Server,
}

impl ToolSide {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Server => "server",
        }
    }
}

impl fmt::Display for ToolSide {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// JSON type accepted by a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    /// JSON string.
    String,
    /// Any JSON number.
    Number,
    /// Whole JSON number.
    Integer,
    /// JSON boolean.
    Boolean,
    /// JSON object.
    Object,
    /// JSON array.
    Array,
    /// Any JSON value.
    Any,
}

impl ParameterKind {
    /// Returns the JSON-Schema type name, or `None` for [`Self::Any`].
    #[must_use]
    pub const fn json_type(self) -> Option<&'static str> {
        match self {
            Self::String => Some("string"),
            Self::Number => Some("number"),
            Self::Integer => Some("integer"),
            Self::Boolean => Some("boolean"),
            Self::Object => Some("object"),
            Self::Array => Some("array"),
            Self::Any => None,
        }
    }

    /// Returns whether `value` has this kind.
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
            Self::Any => true,
        }
    }
}

/// Declared parameter of a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Accepted JSON type.
    pub kind: ParameterKind,
    /// Whether the argument must be supplied.
    pub required: bool,
    /// Human-readable description shown to the agent.
    pub description: String,
}

impl ParameterSpec {
    /// Declares a required parameter.
    #[must_use]
    pub fn required(kind: ParameterKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            required: true,
            description: description.into(),
        }
    }

    /// Declares an optional parameter.
    #[must_use]
    pub fn optional(kind: ParameterKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            required: false,
            description: description.into(),
        }
    }
}

/// Canonical metadata for a tool the agent can call.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    name: ToolName,
    description: String,
    parameters: Vec<(String, ParameterSpec)>,
    side: ToolSide,
    endpoint: Option<String>,
    shape: ResponseShape,
}

impl ToolDescriptor {
    /// Creates a descriptor for a tool that runs inside the host. The
    /// endpoint defaults to `/<name>`.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRegistryError`] when the name or description is invalid.
    pub fn server(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> ToolRegistryResult<Self> {
        Self::build(name.into(), description.into(), ToolSide::Server)
    }

    /// Creates a descriptor for a tool that runs in the agent process.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRegistryError`] when the name or description is invalid.
    pub fn local(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> ToolRegistryResult<Self> {
        Self::build(name.into(), description.into(), ToolSide::Client)
    }

    fn build(name: String, description: String, side: ToolSide) -> ToolRegistryResult<Self> {
        let tool_name = ToolName::new(name)?;
        let normalized_description = description.trim().to_owned();
        if normalized_description.is_empty() {
            return Err(ToolRegistryError::EmptyDescription(tool_name));
        }
        let endpoint = match side {
            ToolSide::Server => Some(format!("/{tool_name}")),
            ToolSide::Client => None,
        };
        Ok(Self {
            name: tool_name,
            description: normalized_description,
            parameters: Vec::new(),
            side,
            endpoint,
            shape: ResponseShape::standard(),
        })
    }

    /// Overrides the endpoint path of a server-side tool. Ignored for local
    /// tools.
    #[must_use]
    pub fn with_endpoint(mut self, path: impl Into<String>) -> Self {
        if self.side == ToolSide::Server {
            self.endpoint = Some(path.into());
        }
        self
    }

    /// Appends a parameter. Declaration order is preserved in listings.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, spec: ParameterSpec) -> Self {
        self.parameters.push((name.into(), spec));
        self
    }

    /// Sets the response shape applied to this tool's results.
    #[must_use]
    pub const fn with_shape(mut self, shape: ResponseShape) -> Self {
        self.shape = shape;
        self
    }

    /// Returns the tool name.
    #[must_use]
    pub const fn name(&self) -> &ToolName {
        &self.name
    }

    /// Returns the tool description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the declared parameters in order.
    #[must_use]
    pub fn parameters(&self) -> &[(String, ParameterSpec)] {
        &self.parameters
    }

    /// Returns where the tool runs.
    #[must_use]
    pub const fn side(&self) -> ToolSide {
        self.side
    }

    /// Returns the endpoint path of a server-side tool.
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Returns the response shape.
    #[must_use]
    pub const fn shape(&self) -> &ResponseShape {
        &self.shape
    }

    /// Checks the endpoint path of a server-side tool.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRegistryError::InvalidEndpoint`] when the path is not
    /// absolute.
    pub fn validate(&self) -> ToolRegistryResult<()> {
        match self.endpoint.as_deref() {
            Some(path) if !path.starts_with('/') || path.len() < 2 => {
                Err(ToolRegistryError::InvalidEndpoint {
                    tool: self.name.clone(),
                    endpoint: path.to_owned(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Renders the parameters as a JSON-Schema object.
    #[must_use]
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for (name, spec) in &self.parameters {
            let mut property = Map::new();
            if let Some(json_type) = spec.kind.json_type() {
                property.insert("type".to_owned(), Value::from(json_type));
            }
            property.insert("description".to_owned(), Value::from(spec.description.clone()));
            properties.insert(name.clone(), Value::Object(property));
            if spec.required {
                required.push(Value::from(name.clone()));
            }
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }

    /// Checks arguments against the declared parameters. `null` counts as an
    /// empty argument object and as an absent argument.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRegistryError`] for non-object arguments, missing
    /// required arguments, wrongly typed arguments, or undeclared arguments.
    pub fn validate_arguments(&self, arguments: &Value) -> ToolRegistryResult<()> {
        let empty = Map::new();
        let object = match arguments {
            Value::Object(object) => object,
            Value::Null => &empty,
            _ => return Err(ToolRegistryError::ArgumentsNotObject(self.name.clone())),
        };

        if let Some(unknown) = object
            .keys()
            .find(|key| !self.parameters.iter().any(|(name, _)| name == *key))
        {
            return Err(ToolRegistryError::UnknownArgument {
                tool: self.name.clone(),
                parameter: unknown.clone(),
            });
        }

        for (name, spec) in &self.parameters {
            match object.get(name) {
                None | Some(Value::Null) if spec.required => {
                    return Err(ToolRegistryError::MissingArgument {
                        tool: self.name.clone(),
                        parameter: name.clone(),
                    });
                }
                None | Some(Value::Null) => {}
                Some(value) if !spec.kind.accepts(value) => {
                    return Err(ToolRegistryError::InvalidArgument {
                        tool: self.name.clone(),
                        parameter: name.clone(),
                        expected: spec.kind.json_type().unwrap_or("any value"),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Describes the tool for agent listings.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "side": self.side,
            "endpoint": self.endpoint,
            "input_schema": self.input_schema(),
        })
    }
}
