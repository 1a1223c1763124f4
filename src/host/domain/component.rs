//! Components of an open model document.

use super::{ComponentId, GeometryClass, ValueClass};
use serde::{Deserialize, Serialize};

/// Kind of a document component, with kind-specific constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentKind {
    /// Number slider with inclusive bounds.
    Slider {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
        /// Decimal places shown by the slider.
        decimals: u8,
    },
    /// Text panel.
    Panel,
    /// Boolean toggle.
    Toggle,
    /// Value list with a fixed set of items.
    ValueList {
        /// Item names in display order.
        items: Vec<String>,
    },
    /// Number container.
    Number,
    /// Integer container.
    Integer,
    /// Text container.
    Text,
    /// Geometry container of a declared shape class.
    Geometry {
        /// Declared shape class.
        class: GeometryClass,
    },
}

impl ComponentKind {
    /// Returns the declared value class of the component.
    #[must_use]
    pub const fn value_class(&self) -> ValueClass {
        match self {
            Self::Slider { .. } | Self::Number => ValueClass::Number,
            Self::Panel | Self::Text => ValueClass::Text,
            Self::Toggle => ValueClass::Boolean,
            Self::ValueList { .. } => ValueClass::Selection,
            Self::Integer => ValueClass::Integer,
            Self::Geometry { class } => ValueClass::Geometry(*class),
        }
    }

    /// Returns the short kind label used in listings.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Slider { .. } => "slider",
            Self::Panel => "panel",
            Self::Toggle => "boolean_toggle",
            Self::ValueList { .. } => "value_list",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Text => "text",
            Self::Geometry { .. } => "geometry",
        }
    }
}

/// Identity and kind of a component inside one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentInfo {
    /// Stable component identifier.
    pub id: ComponentId,
    /// Display name (nickname) shown on the canvas.
    pub name: String,
    /// Component kind.
    pub kind: ComponentKind,
}

impl ComponentInfo {
    /// Creates component metadata with a fresh identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            id: ComponentId::new(),
            name: name.into(),
            kind,
        }
    }
}
