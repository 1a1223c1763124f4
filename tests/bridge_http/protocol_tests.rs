//! HTTP surface tests: status, info, malformed bodies, and unknown routes.

use crate::bridge_http::helpers::TestBridge;
use rhino_bridge::{bridge::protocol::ErrorKind, catalog::endpoints};
use serde_json::{Value, json};

#[tokio::test(flavor = "multi_thread")]
async fn status_reports_a_running_host() {
    let bridge = TestBridge::start().await;

    let status = bridge.client.status().await.expect("status succeeds");
    assert_eq!(status.get("status"), Some(&json!("running")));
    assert_eq!(status.get("rhino_available"), Some(&json!(true)));
    assert_eq!(status.get("debug_mode"), Some(&json!(false)));
    assert!(bridge.client.check_connection().await);

    bridge.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn info_lists_fixed_and_dynamic_endpoints() {
    let bridge = TestBridge::start().await;

    let info = bridge.client.info().await.expect("info succeeds");
    let listed = info
        .get("endpoints")
        .and_then(Value::as_array)
        .expect("endpoint list");
    let dynamic = info
        .get("dynamic_handlers")
        .and_then(Value::as_u64)
        .expect("handler count");
    assert_eq!(listed.len() as u64, dynamic + 2);
    assert!(
        listed
            .iter()
            .any(|endpoint| endpoint.get("path") == Some(&json!(endpoints::DRAW_LINE)))
    );

    bridge.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_json_is_a_bad_request() {
    let bridge = TestBridge::start().await;

    let response = reqwest::Client::new()
        .post(bridge.url(endpoints::DRAW_LINE))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("request sent");
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.expect("JSON body");
    assert_eq!(body.get("success"), Some(&json!(false)));
    assert_eq!(body.get("error_type"), Some(&json!("ValidationError")));
    assert!(body.get("message").and_then(Value::as_str).is_some());
    assert!(bridge.host.objects().is_empty());

    bridge.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_paths_list_the_available_endpoints() {
    let bridge = TestBridge::start().await;

    let response = reqwest::Client::new()
        .post(bridge.url("/teleport"))
        .json(&json!({}))
        .send()
        .await
        .expect("request sent");
    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.expect("JSON body");
    assert_eq!(body.get("error_type"), Some(&json!("EndpointNotFound")));
    let available = body
        .pointer("/details/available_endpoints")
        .and_then(Value::as_array)
        .expect("available endpoints");
    assert!(available.contains(&json!(endpoints::OPEN_DOCUMENT)));

    bridge.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn wrong_methods_on_fixed_routes_are_classified() {
    let bridge = TestBridge::start().await;

    for path in ["/status", "/info"] {
        let failure = bridge.fail(path, json!({})).await;
        assert_eq!(failure.error_type, ErrorKind::EndpointNotFound);
        assert!(failure.message.contains(path));
        assert!(!failure.debug_hint.is_empty());
    }

    bridge.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_bodies_count_as_empty_objects() {
    let bridge = TestBridge::start().await;

    let response = reqwest::Client::new()
        .post(bridge.url(endpoints::GET_ACTIVE_GH_FILES))
        .send()
        .await
        .expect("request sent");
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("JSON body");
    assert_eq!(body.pointer("/data/count"), Some(&json!(2)));

    bridge.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn verbosity_changes_apply_to_the_next_call() {
    let bridge = TestBridge::start().await;
    let line = json!({"start_x": 0, "start_y": 0, "start_z": 0, "end_x": 1, "end_y": 0, "end_z": 0});

    let quiet = bridge.ok(endpoints::DRAW_LINE, line.clone()).await;
    assert!(quiet.get("timing").is_none());

    bridge.verbosity.set(true);
    let verbose = bridge.ok(endpoints::DRAW_LINE, line).await;
    assert!(verbose.get("timing").is_some());

    bridge.stop().await;
}
