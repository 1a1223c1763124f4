//! Component values and their declared classes.

use super::{Geometry, GeometryClass};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;

/// Declared type of a component value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "class", content = "geometry", rename_all = "snake_case")]
pub enum ValueClass {
    /// Floating-point number.
    Number,
    /// Whole number.
    Integer,
    /// Free text.
    Text,
    /// True/false switch.
    Boolean,
    /// Selected items of a value list.
    Selection,
    /// Geometry of the given shape class.
    Geometry(GeometryClass),
}

impl fmt::Display for ValueClass {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number => formatter.write_str("Number"),
            Self::Integer => formatter.write_str("Integer"),
            Self::Text => formatter.write_str("Text"),
            Self::Boolean => formatter.write_str("Boolean"),
            Self::Selection => formatter.write_str("Selection"),
            Self::Geometry(class) => write!(formatter, "{class}"),
        }
    }
}

/// Current value of a host component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ParamValue {
    /// No data.
    Empty,
    /// Floating-point number.
    Number(f64),
    /// Whole number.
    Integer(i64),
    /// Free text.
    Text(String),
    /// True/false switch.
    Boolean(bool),
    /// Selected value-list items.
    Selection(Vec<String>),
    /// Geometry items.
    Geometry(Vec<Geometry>),
}

impl ParamValue {
    /// Returns the runtime class of the value, or `None` when empty.
    ///
    /// A geometry list reports the class shared by all items; mixed lists
    /// report `GeometryClass::Geometry`.
    #[must_use]
    pub fn class(&self) -> Option<ValueClass> {
        match self {
            Self::Empty => None,
            Self::Number(_) => Some(ValueClass::Number),
            Self::Integer(_) => Some(ValueClass::Integer),
            Self::Text(_) => Some(ValueClass::Text),
            Self::Boolean(_) => Some(ValueClass::Boolean),
            Self::Selection(_) => Some(ValueClass::Selection),
            Self::Geometry(items) => {
                let mut classes = items.iter().map(Geometry::class);
                let first = classes.next()?;
                let shared = if classes.all(|class| class == first) {
                    first
                } else {
                    GeometryClass::Geometry
                };
                Some(ValueClass::Geometry(shared))
            }
        }
    }

    /// Returns whether the value carries no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Selection(items) => items.is_empty(),
            Self::Geometry(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Renders the value as plain JSON for wire payloads.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Empty => Value::Null,
            Self::Number(number) => json!(number),
            Self::Integer(integer) => json!(integer),
            Self::Text(text) => Value::String(text.clone()),
            Self::Boolean(flag) => Value::Bool(*flag),
            Self::Selection(items) => json!(items),
            Self::Geometry(items) => {
                serde_json::to_value(items).unwrap_or_else(|_| Value::Array(Vec::new()))
            }
        }
    }

    /// Interprets plain JSON as a value of the given declared class.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when `raw` cannot represent `class`.
    pub fn from_json(raw: &Value, class: ValueClass) -> Result<Self, String> {
        if raw.is_null() {
            return Ok(Self::Empty);
        }
        match class {
            ValueClass::Number => raw
                .as_f64()
                .map(Self::Number)
                .ok_or_else(|| format!("expected a number, got {raw}")),
            ValueClass::Integer => raw
                .as_i64()
                .map(Self::Integer)
                .ok_or_else(|| format!("expected an integer, got {raw}")),
            ValueClass::Text => match raw {
                Value::String(text) => Ok(Self::Text(text.clone())),
                Value::Number(_) | Value::Bool(_) => Ok(Self::Text(raw.to_string())),
                _ => Err(format!("expected text, got {raw}")),
            },
            ValueClass::Boolean => match raw {
                Value::Bool(flag) => Ok(Self::Boolean(*flag)),
                Value::String(text) if text.eq_ignore_ascii_case("true") => Ok(Self::Boolean(true)),
                Value::String(text) if text.eq_ignore_ascii_case("false") => {
                    Ok(Self::Boolean(false))
                }
                _ => Err(format!("expected a boolean, got {raw}")),
            },
            ValueClass::Selection => match raw {
                Value::String(item) => Ok(Self::Selection(vec![item.clone()])),
                Value::Array(items) => items
                    .iter()
                    .map(|item| {
                        item.as_str()
                            .map(str::to_owned)
                            .ok_or_else(|| format!("expected selection item text, got {item}"))
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(Self::Selection),
                _ => Err(format!("expected a selection, got {raw}")),
            },
            ValueClass::Geometry(_) => {
                let items = match raw {
                    Value::Array(_) => serde_json::from_value::<Vec<Geometry>>(raw.clone()),
                    _ => serde_json::from_value::<Geometry>(raw.clone()).map(|item| vec![item]),
                };
                items
                    .map(Self::Geometry)
                    .map_err(|error| format!("expected geometry: {error}"))
            }
        }
    }
}
