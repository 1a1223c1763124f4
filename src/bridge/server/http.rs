//! HTTP surface of the bridge server.

use super::executor::SerializedExecutor;
use crate::bridge::protocol::{BridgeFailure, BridgeResponse, ErrorKind};
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::net::{IpAddr, SocketAddr};
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

const SERVER_NAME: &str = "Rhino Bridge Server";

/// Errors raised while starting or stopping the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The bind address cannot be parsed.
    #[error("invalid bind address '{address}': {reason}")]
    InvalidBindAddress {
        /// Raw address.
        address: String,
        /// Parse failure.
        reason: String,
    },

    /// The bind address is not a loopback address.
    #[error("the bridge server must bind to a loopback address, got {0}")]
    NotLoopback(SocketAddr),

    /// Socket failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The server task ended abnormally.
    #[error("bridge server task failed: {0}")]
    Task(String),
}

/// Builds the router serving `/status`, `/info`, and `POST /<path>`.
pub fn router(executor: SerializedExecutor) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);
    Router::new()
        .route("/status", get(status).fallback(not_found))
        .route("/info", get(info).fallback(not_found))
        .route("/{*path}", post(call).fallback(not_found))
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(executor)
}

async fn status(State(executor): State<SerializedExecutor>) -> Response {
    match executor.status().await {
        Ok(host) => respond(BridgeResponse::Success {
            data: json!({
                "status": "running",
                "host": host.name,
                "rhino_available": host.modeler_available,
                "grasshopper_available": host.solver_available,
                "debug_mode": executor.verbosity().is_verbose(),
                "message": format!("{SERVER_NAME} is running"),
            }),
        }),
        Err(failure) => respond(BridgeResponse::Failure(failure)),
    }
}

async fn info(State(executor): State<SerializedExecutor>) -> Response {
    let table = executor.table();
    let mut endpoints = vec![
        json!({"path": "/status", "method": "GET", "description": "Server status"}),
        json!({"path": "/info", "method": "GET", "description": "Server information"}),
    ];
    endpoints.extend(table.describe());
    respond(BridgeResponse::Success {
        data: json!({
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": endpoints,
            "dynamic_handlers": table.len(),
        }),
    })
}

async fn call(State(executor): State<SerializedExecutor>, uri: Uri, body: Bytes) -> Response {
    let path = uri.path().to_owned();
    let payload = if body.iter().all(u8::is_ascii_whitespace) {
        json!({})
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(parsed) => parsed,
            Err(error) => {
                tracing::warn!(path = %path, error = %error, "request body is not JSON");
                let failure = BridgeFailure::new(
                    ErrorKind::ValidationError,
                    format!("Invalid JSON in request body: {error}"),
                )
                .with_hint("The request body is not valid JSON. Check the request formatting.");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(BridgeResponse::Failure(failure).into_json()),
                )
                    .into_response();
            }
        }
    };
    respond(executor.execute(path, payload).await)
}

async fn not_found(State(executor): State<SerializedExecutor>, method: Method, uri: Uri) -> Response {
    tracing::warn!(method = %method, path = uri.path(), "no route");
    respond(BridgeResponse::Failure(
        BridgeFailure::new(
            ErrorKind::EndpointNotFound,
            format!("Unknown endpoint: {method} {}", uri.path()),
        )
        .with_details(json!({"available_endpoints": executor.table().paths()})),
    ))
}

fn respond(response: BridgeResponse) -> Response {
    let status =
        StatusCode::from_u16(response.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.into_json())).into_response()
}

/// Bridge server configuration.
#[derive(Debug, Clone)]
pub struct BridgeServer {
    bind_address: SocketAddr,
    executor: SerializedExecutor,
}

impl BridgeServer {
    /// Creates a server for a resolved bind address.
    #[must_use]
    pub const fn new(bind_address: SocketAddr, executor: SerializedExecutor) -> Self {
        Self {
            bind_address,
            executor,
        }
    }

    /// Binds the socket and starts serving in the background.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Io`] when the socket cannot be bound.
    pub async fn start(self) -> Result<RunningBridgeServer, ServerError> {
        let listener = tokio::net::TcpListener::bind(self.bind_address).await?;
        let bound_address = listener.local_addr()?;
        let cancellation_token = CancellationToken::new();
        let app = router(self.executor);
        let server_handle = tokio::spawn({
            let shutdown = cancellation_token.child_token();
            async move {
                axum::serve(listener, app)
                    .with_graceful_shutdown(async move {
                        shutdown.cancelled().await;
                    })
                    .await
            }
        });
        tracing::info!(address = %bound_address, "bridge server listening");
        Ok(RunningBridgeServer {
            bound_address,
            cancellation_token,
            server_handle,
        })
    }
}

/// Handle to a running bridge server.
#[derive(Debug)]
pub struct RunningBridgeServer {
    bound_address: SocketAddr,
    cancellation_token: CancellationToken,
    server_handle: JoinHandle<std::io::Result<()>>,
}

impl RunningBridgeServer {
    /// Returns the bound socket address.
    #[must_use]
    pub const fn bound_address(&self) -> SocketAddr {
        self.bound_address
    }

    /// Stops accepting requests and waits for in-flight ones to finish.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when the server task failed.
    pub async fn stop(self) -> Result<(), ServerError> {
        self.cancellation_token.cancel();
        self.server_handle
            .await
            .map_err(|error| ServerError::Task(error.to_string()))??;
        tracing::info!(address = %self.bound_address, "bridge server stopped");
        Ok(())
    }
}

/// Parses a bind address and requires it to be loopback.
///
/// `localhost` is accepted as an alias of `127.0.0.1`.
///
/// # Errors
///
/// Returns [`ServerError::InvalidBindAddress`] or
/// [`ServerError::NotLoopback`].
pub fn resolve_bind_address(address: &str) -> Result<SocketAddr, ServerError> {
    let normalised = address
        .strip_prefix("localhost:")
        .map_or_else(|| address.to_owned(), |port| format!("127.0.0.1:{port}"));
    let parsed: SocketAddr =
        normalised
            .parse()
            .map_err(|error: std::net::AddrParseError| ServerError::InvalidBindAddress {
                address: address.to_owned(),
                reason: error.to_string(),
            })?;
    if !is_loopback(parsed.ip()) {
        return Err(ServerError::NotLoopback(parsed));
    }
    Ok(parsed)
}

const fn is_loopback(address: IpAddr) -> bool {
    match address {
        IpAddr::V4(ip) => ip.is_loopback(),
        IpAddr::V6(ip) => ip.is_loopback(),
    }
}
