//! Tests for EML naming, compatibility, and destination constraints.

use crate::eml::domain::{
    Compatibility, EmlDirection, EmlError, EmlName, compatibility, convert, prepare_write,
};
use crate::host::domain::{ComponentKind, GeometryClass, ParamValue, ValueClass};
use rstest::rstest;

#[rstest]
#[case("eml_input_height", EmlDirection::Input, "height")]
#[case("EML_Output_Site_Boundary", EmlDirection::Output, "site_boundary")]
#[case("  eml_input_x ", EmlDirection::Input, "x")]
fn eml_names_parse_case_insensitively(
    #[case] raw: &str,
    #[case] direction: EmlDirection,
    #[case] logical: &str,
) {
    let parsed = EmlName::parse(raw).expect("name follows the convention");
    assert_eq!(parsed.direction(), direction);
    assert_eq!(parsed.logical_name(), logical);
}

#[rstest]
#[case("height")]
#[case("eml_height")]
#[case("eml_input_")]
#[case("eml_inout_height")]
fn non_conforming_names_are_rejected(#[case] raw: &str) {
    assert_eq!(EmlName::parse(raw), None);
}

#[rstest]
fn eml_name_renders_normalized_form() {
    let parsed = EmlName::parse("EML_INPUT_Height").expect("valid name");
    assert_eq!(parsed.to_string(), "eml_input_height");
}

#[rstest]
#[case(ValueClass::Geometry(GeometryClass::Curve), ValueClass::Geometry(GeometryClass::Curve), Some(Compatibility::Exact))]
#[case(ValueClass::Geometry(GeometryClass::Line), ValueClass::Geometry(GeometryClass::Curve), Some(Compatibility::Convertible))]
#[case(ValueClass::Geometry(GeometryClass::Line), ValueClass::Geometry(GeometryClass::Polyline), Some(Compatibility::Convertible))]
#[case(ValueClass::Geometry(GeometryClass::Surface), ValueClass::Geometry(GeometryClass::Brep), Some(Compatibility::Convertible))]
#[case(ValueClass::Geometry(GeometryClass::Mesh), ValueClass::Geometry(GeometryClass::Geometry), Some(Compatibility::Convertible))]
#[case(ValueClass::Geometry(GeometryClass::Mesh), ValueClass::Geometry(GeometryClass::Curve), None)]
#[case(ValueClass::Geometry(GeometryClass::Curve), ValueClass::Geometry(GeometryClass::Line), None)]
#[case(ValueClass::Integer, ValueClass::Number, Some(Compatibility::Convertible))]
#[case(ValueClass::Text, ValueClass::Selection, Some(Compatibility::Convertible))]
#[case(ValueClass::Boolean, ValueClass::Number, None)]
fn compatibility_follows_conversion_table(
    #[case] from: ValueClass,
    #[case] to: ValueClass,
    #[case] expected: Option<Compatibility>,
) {
    assert_eq!(compatibility(from, to), expected);
}

#[rstest]
fn exact_ranks_before_convertible() {
    assert!(Compatibility::Exact < Compatibility::Convertible);
}

#[rstest]
fn integral_numbers_convert_to_integers() {
    assert_eq!(
        convert("eml_input_floors", &ParamValue::Number(12.0), ValueClass::Integer),
        Ok(ParamValue::Integer(12))
    );
}

#[rstest]
fn fractional_numbers_do_not_convert_to_integers() {
    let result = convert("eml_input_floors", &ParamValue::Number(12.5), ValueClass::Integer);
    assert!(matches!(result, Err(EmlError::Validation { .. })));
}

#[rstest]
fn empty_source_is_a_validation_error() {
    let result = convert("eml_input_x", &ParamValue::Empty, ValueClass::Number);
    assert!(matches!(result, Err(EmlError::Validation { .. })));
}

#[rstest]
fn boolean_to_number_is_incompatible() {
    assert_eq!(
        convert("eml_input_x", &ParamValue::Boolean(true), ValueClass::Number),
        Err(EmlError::IncompatibleType {
            from: ValueClass::Boolean,
            to: ValueClass::Number,
        })
    );
}

fn slider() -> ComponentKind {
    ComponentKind::Slider {
        min: 0.0,
        max: 10.0,
        decimals: 1,
    }
}

#[rstest]
#[case(4.0, 4.0, false)]
#[case(14.0, 10.0, true)]
#[case(-2.0, 0.0, true)]
fn slider_writes_are_clamped(#[case] requested: f64, #[case] written: f64, #[case] clamped: bool) {
    let prepared =
        prepare_write("eml_input_x", &slider(), ParamValue::Number(requested)).expect("valid write");
    assert_eq!(prepared.value, ParamValue::Number(written));
    assert_eq!(prepared.clamped, clamped);
}

#[rstest]
fn slider_rejects_text() {
    let result = prepare_write("eml_input_x", &slider(), ParamValue::Text("high".to_owned()));
    assert!(matches!(result, Err(EmlError::Validation { .. })));
}

#[rstest]
#[case(vec!["Brick"], true)]
#[case(vec!["Concrete"], false)]
#[case(vec![], false)]
fn value_list_requires_known_items(#[case] selected: Vec<&str>, #[case] accepted: bool) {
    let kind = ComponentKind::ValueList {
        items: vec!["Glass".to_owned(), "Brick".to_owned()],
    };
    let value = ParamValue::Selection(selected.into_iter().map(str::to_owned).collect());
    assert_eq!(prepare_write("eml_input_style", &kind, value).is_ok(), accepted);
}

#[rstest]
fn mismatch_is_reported_as_validation_kind() {
    let error = prepare_write("eml_input_x", &ComponentKind::Toggle, ParamValue::Number(1.0))
        .expect_err("toggle rejects numbers");
    assert_eq!(error.kind(), crate::bridge::protocol::ErrorKind::ValidationError);
}
