//! Tests for discovery, suggestion, and transfer through [`EmlCorrelator`].

use crate::eml::{
    domain::{Compatibility, EmlError},
    services::{EmlCorrelator, TransferRequest},
};
use crate::host::{
    adapters::{
        InMemoryDocument, InMemoryHost,
        demo::{MASSING_DOCUMENT, SITE_DOCUMENT},
        demo_host,
    },
    domain::{ComponentKind, Geometry, GeometryClass, ParamValue, Point3},
    session::HostSession,
};
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn host() -> InMemoryHost {
    demo_host().expect("demo host builds")
}

fn session_over(host: &InMemoryHost) -> HostSession {
    HostSession::new(Box::new(host.clone()))
}

#[rstest]
fn discovery_groups_open_documents_by_logical_name(host: InMemoryHost) {
    let mut session = session_over(&host);
    let catalog = EmlCorrelator::new(&mut session)
        .discover()
        .expect("discovery succeeds");

    let boundary = catalog
        .groups
        .get("site_boundary")
        .expect("site boundary group exists");
    assert_eq!(boundary.outputs.len(), 1);
    assert_eq!(boundary.inputs.len(), 1);
    assert!(
        catalog.groups.get("style").is_some_and(|group| group.inputs.is_empty()),
        "closed documents are not scanned"
    );
    assert!(catalog.parameters().all(|parameter| parameter.name.starts_with("eml_")));
}

#[rstest]
fn duplicate_names_keep_first_match_and_are_reported() {
    let host = InMemoryHost::new();
    host.add_open_document(
        InMemoryDocument::new("dup.gh")
            .expect("valid document")
            .with_component("eml_input_height", ComponentKind::Number, ParamValue::Number(1.0))
            .with_component("EML_INPUT_HEIGHT", ComponentKind::Number, ParamValue::Number(2.0))
            .with_component("eml_misc", ComponentKind::Number, ParamValue::Empty),
    )
    .expect("document added");
    let mut session = session_over(&host);
    let catalog = EmlCorrelator::new(&mut session)
        .discover()
        .expect("discovery succeeds");

    let group = catalog.groups.get("height").expect("height group exists");
    assert_eq!(group.inputs.len(), 1);
    assert_eq!(
        group.inputs.first().map(|parameter| parameter.value.clone()),
        Some(ParamValue::Number(1.0))
    );
    assert_eq!(catalog.duplicates.len(), 1);
    assert_eq!(
        catalog.unclassified.first().map(|reference| reference.name.as_str()),
        Some("eml_misc")
    );
}

#[rstest]
fn suggestions_rank_exact_before_convertible_and_drop_incompatible(host: InMemoryHost) {
    let mut session = session_over(&host);
    let suggestions = EmlCorrelator::new(&mut session)
        .suggest()
        .expect("suggestion succeeds");

    let summary: Vec<(&str, Compatibility)> = suggestions
        .iter()
        .map(|suggestion| (suggestion.logical_name.as_str(), suggestion.compatibility))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("max_height", Compatibility::Exact),
            ("site_boundary", Compatibility::Exact),
            ("access_road", Compatibility::Convertible),
        ]
    );
    assert!(
        suggestions
            .iter()
            .all(|suggestion| suggestion.source.file != suggestion.target.file)
    );
}

#[rstest]
fn write_then_read_returns_written_value(host: InMemoryHost) {
    let mut session = session_over(&host);
    let mut correlator = EmlCorrelator::new(&mut session);
    correlator
        .write(Some(MASSING_DOCUMENT), "eml_input_max_height", &json!(42.5))
        .expect("write succeeds");

    let read = correlator
        .find(Some(MASSING_DOCUMENT), "eml_input_max_height")
        .expect("parameter exists");
    assert_eq!(read.value, ParamValue::Number(42.5));
    assert_eq!(host.recompute_count(MASSING_DOCUMENT), Ok(1));
}

#[rstest]
fn write_clamps_slider_values(host: InMemoryHost) {
    let mut session = session_over(&host);
    let outcome = EmlCorrelator::new(&mut session)
        .write(Some(MASSING_DOCUMENT), "max_height", &json!(500))
        .expect("write succeeds");

    assert!(outcome.clamped);
    assert_eq!(outcome.value, ParamValue::Number(60.0));
    assert_eq!(outcome.previous, ParamValue::Number(24.0));
}

#[rstest]
fn find_rejects_malformed_eml_names(host: InMemoryHost) {
    let mut session = session_over(&host);
    let result = EmlCorrelator::new(&mut session).find(Some(SITE_DOCUMENT), "eml_max_height");
    assert_eq!(
        result,
        Err(EmlError::NotEmlParameter("eml_max_height".to_owned()))
    );
}

#[rstest]
fn logical_lookup_matching_both_directions_is_ambiguous() {
    let host = InMemoryHost::new();
    host.add_open_document(
        InMemoryDocument::new("loop.gh")
            .expect("valid document")
            .with_component("eml_input_area", ComponentKind::Number, ParamValue::Empty)
            .with_component("eml_output_area", ComponentKind::Number, ParamValue::Number(3.0)),
    )
    .expect("document added");
    let mut session = session_over(&host);
    let result = EmlCorrelator::new(&mut session).find(None, "area");
    assert!(matches!(result, Err(EmlError::AmbiguousParameter { .. })));
}

#[rstest]
fn transfer_converts_line_to_curve(host: InMemoryHost) {
    let mut session = session_over(&host);
    let outcome = EmlCorrelator::new(&mut session)
        .transfer(&TransferRequest::new(
            SITE_DOCUMENT,
            "eml_output_access_road",
            MASSING_DOCUMENT,
            "eml_input_access_road",
        ))
        .expect("transfer succeeds");

    assert_eq!(outcome.compatibility, Compatibility::Convertible);
    let written = host
        .value_by_name(MASSING_DOCUMENT, "eml_input_access_road")
        .expect("component exists");
    assert_eq!(
        written,
        ParamValue::Geometry(vec![Geometry::Curve {
            control_points: vec![Point3::new(0.0, -5.0, 0.0), Point3::new(40.0, -5.0, 0.0)],
            degree: 1,
        }])
    );
}

#[rstest]
fn mesh_to_curve_transfer_fails_without_mutation(host: InMemoryHost) {
    let mut session = session_over(&host);
    let result = EmlCorrelator::new(&mut session).transfer(&TransferRequest::new(
        SITE_DOCUMENT,
        "eml_output_terrain",
        MASSING_DOCUMENT,
        "eml_input_terrain",
    ));

    assert!(matches!(
        result,
        Err(EmlError::IncompatibleType {
            to: crate::host::domain::ValueClass::Geometry(GeometryClass::Curve),
            ..
        })
    ));
    assert_eq!(
        host.value_by_name(MASSING_DOCUMENT, "eml_input_terrain"),
        Ok(ParamValue::Empty)
    );
    assert_eq!(host.recompute_count(MASSING_DOCUMENT), Ok(0));
}

#[rstest]
fn transfer_from_input_is_a_direction_mismatch(host: InMemoryHost) {
    let mut session = session_over(&host);
    let result = EmlCorrelator::new(&mut session).transfer(&TransferRequest::new(
        MASSING_DOCUMENT,
        "eml_input_site_boundary",
        SITE_DOCUMENT,
        "eml_output_site_boundary",
    ));
    assert!(matches!(result, Err(EmlError::DirectionMismatch { .. })));
}

#[rstest]
fn transfer_into_closed_document_is_refused(host: InMemoryHost) {
    let mut session = session_over(&host);
    let result = EmlCorrelator::new(&mut session).transfer(&TransferRequest::new(
        MASSING_DOCUMENT,
        "eml_output_massing",
        "facade.gh",
        "eml_input_massing",
    ));
    assert!(matches!(result, Err(EmlError::Host(_))));
}
