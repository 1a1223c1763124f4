//! Cross-document EML operations over HTTP.

use crate::bridge_http::helpers::TestBridge;
use rhino_bridge::{
    bridge::protocol::ErrorKind,
    catalog::endpoints,
    host::{
        adapters::demo::{MASSING_DOCUMENT, SITE_DOCUMENT},
        domain::ParamValue,
    },
};
use serde_json::json;

#[tokio::test(flavor = "multi_thread")]
async fn parameter_values_round_trip() {
    let bridge = TestBridge::start().await;

    bridge
        .ok(
            endpoints::SET_EML_PARAMETER_VALUE,
            json!({"file_name": MASSING_DOCUMENT, "parameter_name": "max_height", "value": 42}),
        )
        .await;
    let read = bridge
        .ok(
            endpoints::GET_EML_PARAMETER_VALUE,
            json!({"file_name": MASSING_DOCUMENT, "parameter_name": "eml_input_max_height"}),
        )
        .await;
    assert_eq!(read.pointer("/parameter/value"), Some(&json!(42.0)));

    bridge.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn mesh_to_curve_transfer_is_rejected_without_side_effects() {
    let bridge = TestBridge::start().await;

    let failure = bridge
        .fail(
            endpoints::TRANSFER_EML_PARAMETER,
            json!({
                "source_file": SITE_DOCUMENT,
                "source_parameter": "terrain",
                "target_file": MASSING_DOCUMENT,
                "target_parameter": "terrain",
            }),
        )
        .await;
    assert_eq!(failure.error_type, ErrorKind::IncompatibleGeometryType);
    assert!(!failure.debug_hint.is_empty());
    assert_eq!(
        bridge.host.value_by_name(MASSING_DOCUMENT, "eml_input_terrain"),
        Ok(ParamValue::Empty)
    );
    assert_eq!(bridge.host.recompute_count(MASSING_DOCUMENT), Ok(0));

    bridge.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn compatible_transfers_write_the_target() {
    let bridge = TestBridge::start().await;

    bridge
        .ok(
            endpoints::TRANSFER_EML_PARAMETER,
            json!({
                "source_file": SITE_DOCUMENT,
                "source_parameter": "site_boundary",
                "target_file": MASSING_DOCUMENT,
                "target_parameter": "site_boundary",
            }),
        )
        .await;
    let value = bridge
        .host
        .value_by_name(MASSING_DOCUMENT, "eml_input_site_boundary")
        .expect("component exists");
    assert_ne!(value, ParamValue::Empty);

    bridge.stop().await;
}
