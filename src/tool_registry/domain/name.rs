//! Validated tool name.

use super::ToolRegistryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a tool name.
const MAX_TOOL_NAME_LENGTH: usize = 64;

/// Validated tool name, unique within one registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolName(String);

impl ToolName {
    /// Creates a validated tool name.
    ///
    /// The input is trimmed and lowercased. Only characters in `[a-z0-9_]`
    /// are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRegistryError`] when validation fails.
    pub fn new(value: impl Into<String>) -> Result<Self, ToolRegistryError> {
        let normalized = value.into().trim().to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(ToolRegistryError::EmptyToolName);
        }

        let is_valid = normalized.chars().all(|character| {
            character.is_ascii_lowercase() || character.is_ascii_digit() || character == '_'
        });
        if !is_valid {
            return Err(ToolRegistryError::InvalidToolName(normalized));
        }

        if normalized.len() > MAX_TOOL_NAME_LENGTH {
            return Err(ToolRegistryError::ToolNameTooLong(normalized));
        }

        Ok(Self(normalized))
    }

    /// Returns the tool name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ToolName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
