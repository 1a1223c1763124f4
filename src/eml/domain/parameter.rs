//! EML parameters, discovery catalogs, and connection suggestions.

use super::{Compatibility, EmlDirection};
use crate::host::domain::{ComponentId, ComponentKind, DocumentName, ParamValue, ValueClass};
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// A component that follows the EML naming convention, with its current
/// value as read during the scan that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct EmlParameter {
    /// Owning document.
    pub file: DocumentName,
    /// Host component identifier.
    pub component: ComponentId,
    /// Component display name.
    pub name: String,
    /// Normalized logical name.
    pub logical_name: String,
    /// Parameter direction.
    pub direction: EmlDirection,
    /// Component kind and its constraints.
    pub component_kind: ComponentKind,
    /// Current value.
    pub value: ParamValue,
}

impl EmlParameter {
    /// Returns the declared value class.
    #[must_use]
    pub const fn declared_type(&self) -> ValueClass {
        self.component_kind.value_class()
    }

    /// Returns a reference naming this parameter.
    #[must_use]
    pub fn reference(&self) -> ParameterRef {
        ParameterRef {
            file: self.file.clone(),
            name: self.name.clone(),
        }
    }

    /// Renders the parameter for wire payloads.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut rendered = json!({
            "file": self.file.as_str(),
            "name": self.name,
            "logical_name": self.logical_name,
            "direction": self.direction.as_str(),
            "component": self.component_kind.label(),
            "type": self.declared_type().to_string(),
            "value": self.value.to_json(),
        });
        if let (ComponentKind::Slider { min, max, decimals }, Some(object)) =
            (&self.component_kind, rendered.as_object_mut())
        {
            object.insert(
                "constraints".to_owned(),
                json!({"min": min, "max": max, "decimals": decimals}),
            );
        }
        if let (ComponentKind::ValueList { items }, Some(object)) =
            (&self.component_kind, rendered.as_object_mut())
        {
            object.insert("items".to_owned(), json!(items));
        }
        rendered
    }
}

/// File-qualified parameter name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ParameterRef {
    /// Owning document.
    pub file: DocumentName,
    /// Component display name.
    pub name: String,
}

/// Inputs and outputs sharing one logical name across open documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogicalGroup {
    /// Input parameters in scan order.
    pub inputs: Vec<EmlParameter>,
    /// Output parameters in scan order.
    pub outputs: Vec<EmlParameter>,
}

/// Result of one discovery scan over all open documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmlCatalog {
    /// Groups keyed by logical name.
    pub groups: BTreeMap<String, LogicalGroup>,
    /// Parameters ignored because an earlier component in the same document
    /// already claimed the direction and logical name.
    pub duplicates: Vec<ParameterRef>,
    /// Components with the `eml_` prefix but no valid direction.
    pub unclassified: Vec<ParameterRef>,
}

impl EmlCatalog {
    /// Iterates over every classified parameter, grouped by logical name.
    pub fn parameters(&self) -> impl Iterator<Item = &EmlParameter> {
        self.groups
            .values()
            .flat_map(|group| group.outputs.iter().chain(group.inputs.iter()))
    }

    /// Counts classified parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters().count()
    }

    /// Returns whether the scan found no classified parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Renders the catalog for wire payloads.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let groups: serde_json::Map<String, Value> = self
            .groups
            .iter()
            .map(|(logical, group)| {
                let rendered = json!({
                    "inputs": group.inputs.iter().map(EmlParameter::to_json).collect::<Vec<_>>(),
                    "outputs": group.outputs.iter().map(EmlParameter::to_json).collect::<Vec<_>>(),
                });
                (logical.clone(), rendered)
            })
            .collect();
        json!({
            "groups": groups,
            "duplicates": self.duplicates,
            "unclassified": self.unclassified,
            "total_count": self.len(),
        })
    }
}

/// A proposed output-to-input connection across documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// Shared logical name.
    pub logical_name: String,
    /// Output parameter.
    pub source: ParameterRef,
    /// Input parameter in another document.
    pub target: ParameterRef,
    /// Declared class of the output.
    pub source_type: String,
    /// Declared class of the input.
    pub target_type: String,
    /// Match quality.
    pub compatibility: Compatibility,
}
