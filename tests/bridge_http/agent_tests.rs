//! The tool invoker driving the live server.

use crate::bridge_http::helpers::TestBridge;
use rhino_bridge::{
    agent::ToolInvoker,
    catalog::tool_registry,
    config::VerbosityFlag,
    host::{adapters::demo::MASSING_DOCUMENT, domain::ParamValue},
};
use serde_json::{Value, json};
use std::sync::Arc;

fn invoker(bridge: &TestBridge) -> ToolInvoker<rhino_bridge::bridge::client::BridgeClient> {
    ToolInvoker::new(
        Arc::new(tool_registry().expect("registry builds")),
        bridge.client.clone(),
        VerbosityFlag::new(false),
    )
}

#[tokio::test(flavor = "multi_thread")]
async fn server_tools_reach_the_host() {
    let bridge = TestBridge::start().await;
    let invoker = invoker(&bridge);

    let data = invoker
        .invoke(
            "set_grasshopper_slider",
            json!({"file_name": MASSING_DOCUMENT, "slider_name": "Floors", "new_value": 12}),
        )
        .await
        .expect("slider write succeeds");
    assert_eq!(data.get("new_value"), Some(&json!(12.0)));
    assert_eq!(
        bridge.host.value_by_name(MASSING_DOCUMENT, "Floors"),
        Ok(ParamValue::Number(12.0))
    );

    bridge.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn handler_failures_arrive_as_payloads() {
    let bridge = TestBridge::start().await;
    let invoker = invoker(&bridge);

    let payload = invoker
        .invoke_payload("open_document", json!({"file_name": "nowhere.gh"}))
        .await;
    assert_eq!(payload.get("success"), Some(&Value::Bool(false)));
    assert_eq!(payload.get("error_type"), Some(&json!("ValidationError")));
    assert!(payload.get("debug_hint").and_then(Value::as_str).is_some());

    bridge.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn local_tools_work_without_touching_the_host() {
    let bridge = TestBridge::start().await;
    let invoker = invoker(&bridge);

    let payload = invoker.invoke_payload("hello_world", json!({})).await;
    assert_eq!(payload.get("success"), Some(&Value::Bool(true)));
    assert!(bridge.host.objects().is_empty());

    bridge.stop().await;
}
