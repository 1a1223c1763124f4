//! Value-class compatibility and explicit conversions.

use super::{EmlError, EmlResult};
use crate::host::domain::{GeometryClass, ParamValue, ValueClass};
use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) of integral `f64` values representable as `i64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// How well a source class fits a destination class.
///
/// The ordering ranks [`Compatibility::Exact`] before
/// [`Compatibility::Convertible`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compatibility {
    /// Same declared class.
    Exact,
    /// An explicit conversion exists.
    Convertible,
}

/// Returns the compatibility of `from` values with a `to` destination, or
/// `None` when no conversion exists.
#[must_use]
pub fn compatibility(from: ValueClass, to: ValueClass) -> Option<Compatibility> {
    if from == to {
        return Some(Compatibility::Exact);
    }
    let convertible = match (from, to) {
        (ValueClass::Geometry(_), ValueClass::Geometry(GeometryClass::Geometry))
        | (ValueClass::Integer, ValueClass::Number)
        | (ValueClass::Number, ValueClass::Integer)
        | (ValueClass::Text, ValueClass::Selection)
        | (ValueClass::Selection, ValueClass::Text) => true,
        (ValueClass::Geometry(source), ValueClass::Geometry(target)) => matches!(
            (source, target),
            (GeometryClass::Line, GeometryClass::Curve | GeometryClass::Polyline)
                | (GeometryClass::Polyline, GeometryClass::Curve)
                | (GeometryClass::Surface, GeometryClass::Brep)
        ),
        _ => false,
    };
    convertible.then_some(Compatibility::Convertible)
}

/// Converts `value` to the destination class `target`.
///
/// Geometry lists convert item by item; the whole conversion fails if any
/// item has no conversion.
///
/// # Errors
///
/// Returns [`EmlError::IncompatibleType`] when no conversion exists, and
/// [`EmlError::Validation`] when the value is empty or a number is not
/// integral.
pub fn convert(parameter: &str, value: &ParamValue, target: ValueClass) -> EmlResult<ParamValue> {
    let Some(source) = value.class() else {
        return Err(EmlError::Validation {
            parameter: parameter.to_owned(),
            reason: "source parameter holds no value".to_owned(),
        });
    };
    match (value, target) {
        (ParamValue::Geometry(items), ValueClass::Geometry(class)) => items
            .iter()
            .map(|item| {
                item.convert_to(class).ok_or(EmlError::IncompatibleType {
                    from: ValueClass::Geometry(item.class()),
                    to: target,
                })
            })
            .collect::<EmlResult<Vec<_>>>()
            .map(ParamValue::Geometry),
        (ParamValue::Number(number), ValueClass::Integer) => integral(parameter, *number),
        (ParamValue::Integer(integer), ValueClass::Number) => Ok(ParamValue::Number(widen(*integer))),
        (ParamValue::Text(text), ValueClass::Selection) => {
            Ok(ParamValue::Selection(vec![text.clone()]))
        }
        (ParamValue::Selection(items), ValueClass::Text) => Ok(ParamValue::Text(items.join(", "))),
        _ if source == target => Ok(value.clone()),
        _ => Err(EmlError::IncompatibleType {
            from: source,
            to: target,
        }),
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "value is integral and inside the i64 range"
)]
fn integral(parameter: &str, number: f64) -> EmlResult<ParamValue> {
    if number.is_finite() && number.fract() == 0.0 && number >= -I64_BOUND && number < I64_BOUND {
        Ok(ParamValue::Integer(number as i64))
    } else {
        Err(EmlError::Validation {
            parameter: parameter.to_owned(),
            reason: format!("{number} is not a whole number"),
        })
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "integers above 2^53 lose precision exactly as the host does"
)]
const fn widen(integer: i64) -> f64 {
    integer as f64
}
