//! Destination constraints checked before any write.

use super::{EmlError, EmlResult};
use crate::host::domain::{ComponentKind, GeometryClass, ParamValue};

/// A value that passed destination validation.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedWrite {
    /// Value to write.
    pub value: ParamValue,
    /// Whether a slider value was clamped into its bounds.
    pub clamped: bool,
}

/// Validates `value` against the constraints of a component kind.
///
/// Slider values are clamped into `[min, max]`. Value-list selections must
/// name existing items. Geometry must match the declared class.
///
/// # Errors
///
/// Returns [`EmlError::Validation`] when the value cannot be written.
pub fn prepare_write(
    parameter: &str,
    kind: &ComponentKind,
    value: ParamValue,
) -> EmlResult<PreparedWrite> {
    let invalid = |reason: String| EmlError::Validation {
        parameter: parameter.to_owned(),
        reason,
    };
    match (kind, value) {
        (ComponentKind::Slider { min, max, .. }, ParamValue::Number(number)) => {
            if min.is_nan() || max.is_nan() || min > max {
                return Err(invalid(format!("slider bounds [{min}, {max}] are invalid")));
            }
            if number.is_nan() {
                return Err(invalid("slider value is not a number".to_owned()));
            }
            let clamped = number < *min || number > *max;
            Ok(PreparedWrite {
                value: ParamValue::Number(number.clamp(*min, *max)),
                clamped,
            })
        }
        (ComponentKind::ValueList { items }, ParamValue::Selection(selected)) => {
            if selected.is_empty() {
                return Err(invalid("select at least one value-list item".to_owned()));
            }
            if let Some(unknown) = selected.iter().find(|item| !items.contains(item)) {
                return Err(invalid(format!(
                    "'{unknown}' is not one of: {}",
                    items.join(", ")
                )));
            }
            Ok(unclamped(ParamValue::Selection(selected)))
        }
        (ComponentKind::Geometry { class }, ParamValue::Geometry(geometry)) => {
            if let Some(item) = geometry
                .iter()
                .find(|item| *class != GeometryClass::Geometry && item.class() != *class)
            {
                return Err(invalid(format!(
                    "expected {class} geometry, got {}",
                    item.class()
                )));
            }
            Ok(unclamped(ParamValue::Geometry(geometry)))
        }
        (
            ComponentKind::Geometry { .. }
            | ComponentKind::Panel
            | ComponentKind::Text
            | ComponentKind::Number
            | ComponentKind::Integer,
            ParamValue::Empty,
        ) => Ok(unclamped(ParamValue::Empty)),
        (ComponentKind::Panel | ComponentKind::Text, accepted @ ParamValue::Text(_))
        | (ComponentKind::Toggle, accepted @ ParamValue::Boolean(_))
        | (ComponentKind::Number, accepted @ ParamValue::Number(_))
        | (ComponentKind::Integer, accepted @ ParamValue::Integer(_)) => Ok(unclamped(accepted)),
        (other, rejected) => Err(invalid(format!(
            "{} expects {} values, got {}",
            other.label(),
            other.value_class(),
            rejected
                .class()
                .map_or_else(|| "an empty value".to_owned(), |class| class.to_string())
        ))),
    }
}

const fn unclamped(value: ParamValue) -> PreparedWrite {
    PreparedWrite {
        value,
        clamped: false,
    }
}
