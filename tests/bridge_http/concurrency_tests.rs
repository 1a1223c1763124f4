//! Concurrent requests against the single host session.

use crate::bridge_http::helpers::TestBridge;
use rhino_bridge::{
    bridge::{client::BridgeTransport, protocol::BridgeRequest},
    catalog::endpoints,
    host::adapters::demo::MASSING_DOCUMENT,
};
use serde_json::{Value, json};
use std::collections::HashSet;

const CALLS: usize = 12;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_draws_all_land() {
    let bridge = TestBridge::start().await;

    let handles: Vec<_> = (0..CALLS)
        .map(|index| {
            let client = bridge.client.clone();
            tokio::spawn(async move {
                let payload = json!({
                    "start_x": 0, "start_y": 0, "start_z": 0,
                    "end_x": index, "end_y": 1, "end_z": 0,
                });
                client
                    .send(BridgeRequest::new(endpoints::DRAW_LINE, payload))
                    .await
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        let data = handle
            .await
            .expect("task joins")
            .expect("draw succeeds");
        let id = data
            .get("line_id")
            .and_then(Value::as_str)
            .expect("line id")
            .to_owned();
        ids.insert(id);
    }
    assert_eq!(ids.len(), CALLS);
    assert_eq!(bridge.host.objects().len(), CALLS);

    bridge.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_slider_writes_each_recompute_once() {
    let bridge = TestBridge::start().await;

    let handles: Vec<_> = (1..=CALLS)
        .map(|floors| {
            let client = bridge.client.clone();
            tokio::spawn(async move {
                let payload = json!({
                    "file_name": MASSING_DOCUMENT,
                    "slider_name": "Floors",
                    "new_value": floors,
                });
                client
                    .send(BridgeRequest::new(endpoints::SET_SLIDER, payload))
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await.expect("task joins").expect("slider write succeeds");
    }

    assert_eq!(
        bridge.host.recompute_count(MASSING_DOCUMENT),
        Ok(CALLS as u64)
    );

    bridge.stop().await;
}
