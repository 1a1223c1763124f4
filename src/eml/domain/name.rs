//! The `eml_<direction>_<logical-name>` naming convention.

use serde::{Deserialize, Serialize};
use std::fmt;

const PREFIX: &str = "eml_";

/// Direction of an EML parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmlDirection {
    /// Receives values from other documents.
    Input,
    /// Publishes values to other documents.
    Output,
}

impl EmlDirection {
    /// Returns the direction as used in component names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
        }
    }
}

impl fmt::Display for EmlDirection {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A component name that follows the EML convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmlName {
    direction: EmlDirection,
    logical_name: String,
}

impl EmlName {
    /// Parses a component display name.
    ///
    /// Matching is case-insensitive and the logical name is lower-cased.
    /// Returns `None` when the name does not follow the convention.
    #[must_use]
    pub fn parse(display_name: &str) -> Option<Self> {
        let lowered = display_name.trim().to_ascii_lowercase();
        let rest = lowered.strip_prefix(PREFIX)?;
        let (direction, logical) = if let Some(logical) = rest.strip_prefix("input_") {
            (EmlDirection::Input, logical)
        } else {
            (EmlDirection::Output, rest.strip_prefix("output_")?)
        };
        if logical.is_empty() {
            return None;
        }
        Some(Self {
            direction,
            logical_name: logical.to_owned(),
        })
    }

    /// Returns whether the name carries the `eml_` prefix at all.
    #[must_use]
    pub fn has_prefix(display_name: &str) -> bool {
        display_name
            .trim()
            .to_ascii_lowercase()
            .starts_with(PREFIX)
    }

    /// Returns the parameter direction.
    #[must_use]
    pub const fn direction(&self) -> EmlDirection {
        self.direction
    }

    /// Returns the normalized logical name.
    #[must_use]
    pub fn logical_name(&self) -> &str {
        &self.logical_name
    }
}

impl fmt::Display for EmlName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{PREFIX}{}_{}",
            self.direction.as_str(),
            self.logical_name
        )
    }
}
