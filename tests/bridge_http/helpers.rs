//! Shared server fixture for bridge integration tests.

use mockable::DefaultClock;
use rhino_bridge::{
    bridge::{
        client::{BridgeClient, BridgeClientError, BridgeTransport},
        protocol::{BridgeFailure, BridgeRequest},
        server::{BridgeServer, RunningBridgeServer, SerializedExecutor},
    },
    catalog::dispatch_table,
    config::{BridgeSettings, VerbosityFlag},
    host::{
        adapters::{InMemoryHost, demo_host},
        session::HostSession,
    },
};
use serde_json::Value;
use std::{net::SocketAddr, sync::Arc};

/// Running server over the demonstration host.
pub struct TestBridge {
    pub host: InMemoryHost,
    pub client: BridgeClient,
    pub verbosity: VerbosityFlag,
    running: RunningBridgeServer,
}

impl TestBridge {
    /// Starts a server on `127.0.0.1:0` and a client pointed at it.
    pub async fn start() -> Self {
        let host = demo_host().expect("demo host builds");
        let verbosity = VerbosityFlag::new(false);
        let executor = SerializedExecutor::new(
            HostSession::new(Box::new(host.clone())),
            dispatch_table(Arc::new(DefaultClock)).expect("dispatch table builds"),
            verbosity.clone(),
        );
        let address: SocketAddr = "127.0.0.1:0".parse().expect("loopback address");
        let running = BridgeServer::new(address, executor)
            .start()
            .await
            .expect("server starts");
        let settings = BridgeSettings::default().with_port(running.bound_address().port());
        let client = BridgeClient::new(settings).expect("client builds");
        Self {
            host,
            client,
            verbosity,
            running,
        }
    }

    /// Absolute URL of a server path.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.running.bound_address())
    }

    /// Posts a payload and expects success data.
    pub async fn ok(&self, path: &str, payload: Value) -> Value {
        self.client
            .send(BridgeRequest::new(path, payload))
            .await
            .unwrap_or_else(|error| panic!("{path} failed: {error}"))
    }

    /// Posts a payload and expects a classified handler failure.
    pub async fn fail(&self, path: &str, payload: Value) -> BridgeFailure {
        match self.client.send(BridgeRequest::new(path, payload)).await {
            Ok(data) => panic!("{path} unexpectedly succeeded: {data}"),
            Err(BridgeClientError::Handler(failure)) => failure,
            Err(other) => panic!("{path} failed outside the handler: {other}"),
        }
    }

    /// Stops the server and waits for it to finish.
    pub async fn stop(self) {
        self.running.stop().await.expect("server stops cleanly");
    }
}
