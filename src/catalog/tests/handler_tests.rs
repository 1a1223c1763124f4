//! Tests for the catalog handlers against the demonstration host.

use crate::bridge::{
    protocol::{BridgeFailure, BridgeResponse, ErrorKind},
    server::DispatchTable,
};
use crate::catalog::{dispatch_table, endpoints};
use crate::host::{
    adapters::{
        InMemoryHost,
        demo::{FACADE_DOCUMENT, MASSING_DOCUMENT, SITE_DOCUMENT},
        demo_host,
    },
    domain::ParamValue,
    session::HostSession,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::sync::Arc;

struct Bridge {
    host: InMemoryHost,
    session: HostSession,
    table: DispatchTable,
}

impl Bridge {
    fn call(&mut self, path: &str, payload: Value) -> BridgeResponse {
        self.table.dispatch(&mut self.session, path, &payload, false)
    }

    fn ok(&mut self, path: &str, payload: Value) -> Value {
        match self.call(path, payload) {
            BridgeResponse::Success { data } => data,
            BridgeResponse::Failure(failure) => panic!("{path} failed: {failure}"),
        }
    }

    fn fail(&mut self, path: &str, payload: Value) -> BridgeFailure {
        match self.call(path, payload) {
            BridgeResponse::Success { data } => panic!("{path} unexpectedly succeeded: {data}"),
            BridgeResponse::Failure(failure) => failure,
        }
    }
}

#[fixture]
fn bridge() -> Bridge {
    let host = demo_host().expect("demo host builds");
    Bridge {
        session: HostSession::new(Box::new(host.clone())),
        host,
        table: dispatch_table(Arc::new(DefaultClock)).expect("table builds"),
    }
}

#[rstest]
fn active_files_lists_open_documents(mut bridge: Bridge) {
    let data = bridge.ok(endpoints::GET_ACTIVE_GH_FILES, json!({}));
    assert_eq!(data.get("count"), Some(&json!(2)));
    assert_eq!(data.get("active_file"), Some(&json!(SITE_DOCUMENT)));
}

#[rstest]
fn open_document_activates_a_closed_document(mut bridge: Bridge) {
    bridge.ok(endpoints::OPEN_DOCUMENT, json!({"file_name": FACADE_DOCUMENT}));
    let data = bridge.ok(endpoints::GET_ACTIVE_GH_FILES, json!({}));
    assert_eq!(data.get("count"), Some(&json!(3)));
    assert_eq!(data.get("active_file"), Some(&json!(FACADE_DOCUMENT)));
}

#[rstest]
fn unknown_documents_are_validation_errors(mut bridge: Bridge) {
    let failure = bridge.fail(endpoints::OPEN_DOCUMENT, json!({"file_name": "missing.gh"}));
    assert_eq!(failure.error_type, ErrorKind::ValidationError);
}

#[rstest]
fn list_sliders_reports_bounds(mut bridge: Bridge) {
    let data = bridge.ok(endpoints::LIST_SLIDERS, json!({"file_name": MASSING_DOCUMENT}));
    assert_eq!(data.get("count"), Some(&json!(2)));
    let first = data.pointer("/sliders/0").expect("a slider");
    assert_eq!(first.get("name"), Some(&json!("Floors")));
    assert_eq!(first.get("max_value"), Some(&json!(30.0)));
}

#[rstest]
fn set_slider_clamps_and_recomputes(mut bridge: Bridge) {
    let data = bridge.ok(
        endpoints::SET_SLIDER,
        json!({"file_name": MASSING_DOCUMENT, "slider_name": "Floors", "new_value": 45}),
    );
    assert_eq!(data.get("clamped"), Some(&json!(true)));
    assert_eq!(data.get("old_value"), Some(&json!(8.0)));
    assert_eq!(data.get("new_value"), Some(&json!(30.0)));
    assert_eq!(
        bridge.host.value_by_name(MASSING_DOCUMENT, "Floors"),
        Ok(ParamValue::Number(30.0))
    );
    assert_eq!(bridge.host.recompute_count(MASSING_DOCUMENT), Ok(1));
}

#[rstest]
fn set_slider_reports_unknown_sliders(mut bridge: Bridge) {
    let failure = bridge.fail(
        endpoints::SET_SLIDER,
        json!({"file_name": MASSING_DOCUMENT, "slider_name": "Storeys", "new_value": 3}),
    );
    assert_eq!(failure.error_type, ErrorKind::ValidationError);
    assert_eq!(failure.exception_type.as_deref(), Some("SliderNotFound"));
    assert!(failure.debug_hint.contains("list_grasshopper_sliders"));
}

#[rstest]
fn missing_arguments_are_validation_errors(mut bridge: Bridge) {
    let failure = bridge.fail(endpoints::SET_SLIDER, json!({"file_name": MASSING_DOCUMENT}));
    assert_eq!(failure.error_type, ErrorKind::ValidationError);
    assert!(failure.message.contains("slider_name"));
}

#[rstest]
fn eml_values_round_trip(mut bridge: Bridge) {
    let written = bridge.ok(
        endpoints::SET_EML_PARAMETER_VALUE,
        json!({"file_name": MASSING_DOCUMENT, "parameter_name": "max_height", "value": 42}),
    );
    assert_eq!(written.get("clamped"), Some(&json!(false)));

    let read = bridge.ok(
        endpoints::GET_EML_PARAMETER_VALUE,
        json!({"file_name": MASSING_DOCUMENT, "parameter_name": "eml_input_max_height"}),
    );
    assert_eq!(read.pointer("/parameter/value"), Some(&json!(42.0)));
}

#[rstest]
fn eml_listing_groups_by_logical_name(mut bridge: Bridge) {
    let data = bridge.ok(endpoints::LIST_EML_PARAMETERS, json!({}));
    assert!(data.pointer("/groups/site_boundary").is_some());
    assert!(data.get("message").is_some());
}

#[rstest]
fn suggestions_are_listed(mut bridge: Bridge) {
    let data = bridge.ok(endpoints::SUGGEST_EML_CONNECTIONS, json!({}));
    assert_eq!(data.get("count"), Some(&json!(3)));
    assert_eq!(
        data.pointer("/suggestions/0/compatibility"),
        Some(&json!("exact"))
    );
}

#[rstest]
fn incompatible_transfer_leaves_the_target_unchanged(mut bridge: Bridge) {
    let failure = bridge.fail(
        endpoints::TRANSFER_EML_PARAMETER,
        json!({
            "source_file": SITE_DOCUMENT,
            "source_parameter": "terrain",
            "target_file": MASSING_DOCUMENT,
            "target_parameter": "terrain",
        }),
    );
    assert_eq!(failure.error_type, ErrorKind::IncompatibleGeometryType);
    assert_eq!(
        bridge.host.value_by_name(MASSING_DOCUMENT, "eml_input_terrain"),
        Ok(ParamValue::Empty)
    );
}

#[rstest]
fn draw_and_select_keeps_selected_objects(mut bridge: Bridge) {
    let drawn = bridge.ok(
        endpoints::DRAW_LINE,
        json!({"start_x": 0, "start_y": 0, "start_z": 0, "end_x": 3, "end_y": 4, "end_z": 0}),
    );
    assert_eq!(drawn.get("length"), Some(&json!(5.0)));

    let object = bridge.host.objects().into_iter().next().expect("line drawn");
    bridge.host.select(object.id).expect("object exists");

    let selected = bridge.ok(endpoints::GET_SELECTED_OBJECTS, json!({}));
    assert_eq!(selected.get("count"), Some(&json!(1)));
    assert!(selected.get("host_objects").is_some());
    assert!(selected.get("timing").is_none());
}

#[rstest]
fn bake_strips_diagnostic_objects(mut bridge: Bridge) {
    let data = bridge.ok(
        endpoints::BAKE_GEOMETRY,
        json!({"file_name": MASSING_DOCUMENT, "parameter_name": "massing"}),
    );
    assert_eq!(data.get("count"), Some(&json!(1)));
    assert_eq!(data.get("layer"), Some(&json!("Baked")));
    assert!(data.get("host_objects").is_none());
    assert_eq!(bridge.host.objects().len(), 1);
}

#[rstest]
fn baking_a_slider_is_rejected(mut bridge: Bridge) {
    let failure = bridge.fail(
        endpoints::BAKE_GEOMETRY,
        json!({"file_name": MASSING_DOCUMENT, "parameter_name": "Floors"}),
    );
    assert_eq!(failure.error_type, ErrorKind::ValidationError);
    assert!(bridge.host.objects().is_empty());
}

#[rstest]
fn run_workflow_returns_the_report(mut bridge: Bridge) {
    let document = json!({
        "workflows": [{
            "name": "site_to_massing",
            "steps": [
                {"file": MASSING_DOCUMENT, "action": "open"},
                {
                    "file": MASSING_DOCUMENT,
                    "action": "transfer_geometry",
                    "source_file": SITE_DOCUMENT,
                    "source_parameter": "site_boundary",
                    "target_parameter": "site_boundary",
                },
            ],
        }],
    });
    let data = bridge.ok(
        endpoints::RUN_WORKFLOW,
        json!({"workflow_document": document, "workflow_name": "site_to_massing"}),
    );
    assert_eq!(data.pointer("/report/skipped"), Some(&json!(0)));
    assert_eq!(
        data.pointer("/report/completed")
            .and_then(Value::as_array)
            .map(Vec::len),
        Some(2)
    );
}

#[rstest]
fn unknown_workflows_are_validation_errors(mut bridge: Bridge) {
    let failure = bridge.fail(
        endpoints::RUN_WORKFLOW,
        json!({
            "workflow_document": {"workflows": [{"name": "a", "steps": [{"file": "site.gh", "action": "open"}]}]},
            "workflow_name": "b",
        }),
    );
    assert_eq!(failure.error_type, ErrorKind::ValidationError);
    assert!(failure.message.contains("'b' not found"));
}
