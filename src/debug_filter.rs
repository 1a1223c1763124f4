//! Verbosity-dependent response shaping.
//!
//! Handlers declare which keys of their output are diagnostic and which are
//! essential. In non-verbose mode diagnostic keys are dropped unless the
//! handler marked them essential; verbose mode passes output through
//! unchanged.

use serde::Serialize;
use serde_json::{Map, Value};

/// Diagnostic keys removed from every response in non-verbose mode.
pub const DEFAULT_DIAGNOSTIC_KEYS: &[&str] = &["trace", "timing", "host_objects", "request_data"];

/// Per-handler declaration of essential and extra diagnostic keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResponseShape {
    essential: &'static [&'static str],
    diagnostic: &'static [&'static str],
}

impl ResponseShape {
    /// Creates a shape.
    ///
    /// `diagnostic` extends [`DEFAULT_DIAGNOSTIC_KEYS`]; `essential` keys are
    /// never removed, even when listed as diagnostic.
    #[must_use]
    pub const fn new(essential: &'static [&'static str], diagnostic: &'static [&'static str]) -> Self {
        Self {
            essential,
            diagnostic,
        }
    }

    /// Shape with no essential overrides and only the default diagnostic
    /// keys.
    #[must_use]
    pub const fn standard() -> Self {
        Self::new(&[], &[])
    }

    /// Returns the keys declared essential.
    #[must_use]
    pub const fn essential(&self) -> &'static [&'static str] {
        self.essential
    }

    /// Returns whether non-verbose output drops `key`.
    #[must_use]
    pub fn is_removed(&self, key: &str) -> bool {
        let diagnostic =
            DEFAULT_DIAGNOSTIC_KEYS.contains(&key) || self.diagnostic.contains(&key);
        diagnostic && !self.essential.contains(&key)
    }
}

impl Default for ResponseShape {
    fn default() -> Self {
        Self::standard()
    }
}

/// Shapes a raw response according to the verbosity setting.
///
/// Removal applies to the top-level object and to a top-level `data`
/// object. Non-object input is returned unchanged.
#[must_use]
pub fn shape(raw: Value, response_shape: &ResponseShape, verbose: bool) -> Value {
    if verbose {
        return raw;
    }
    match raw {
        Value::Object(object) => Value::Object(strip(object, response_shape, true)),
        other => other,
    }
}

fn strip(object: Map<String, Value>, response_shape: &ResponseShape, top_level: bool) -> Map<String, Value> {
    object
        .into_iter()
        .filter(|(key, _)| !response_shape.is_removed(key))
        .map(|(key, value)| match value {
            Value::Object(nested) if top_level && key == "data" => {
                let stripped = strip(nested, response_shape, false);
                (key, Value::Object(stripped))
            }
            other => (key, other),
        })
        .collect()
}
