//! HTTP client for the bridge server.

use super::protocol::{BridgeFailure, BridgeRequest, BridgeResponse, ErrorKind};
use crate::config::BridgeSettings;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use thiserror::Error;

/// Errors returned by bridge calls. Every variant is classified and carries
/// an actionable hint.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BridgeClientError {
    /// The bridge server could not be reached.
    #[error("cannot connect to the bridge server at {url}: {message}")]
    Connection {
        /// Target URL.
        url: String,
        /// Transport error text.
        message: String,
    },

    /// No response arrived within the configured wait.
    #[error("request to {path} timed out after {timeout_ms} ms")]
    Timeout {
        /// Endpoint path.
        path: String,
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },

    /// The response was not a well-formed bridge payload.
    #[error("malformed response from {path}: {message}")]
    Protocol {
        /// Endpoint path.
        path: String,
        /// Parse failure.
        message: String,
        /// HTTP status of the response, if one was received.
        status: Option<u16>,
    },

    /// The server reported a classified failure.
    #[error("{0}")]
    Handler(BridgeFailure),
}

impl BridgeClientError {
    /// Returns the failure classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Connection { .. } => ErrorKind::ConnectionError,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Protocol { .. } => ErrorKind::ProtocolError,
            Self::Handler(failure) => failure.error_type,
        }
    }

    /// Returns the actionable hint.
    #[must_use]
    pub fn hint(&self) -> &str {
        match self {
            Self::Handler(failure) => &failure.debug_hint,
            other => other.kind().default_hint(),
        }
    }

    /// Converts the error into a wire failure for reporting.
    #[must_use]
    pub fn into_failure(self) -> BridgeFailure {
        match self {
            Self::Handler(failure) => failure,
            other => BridgeFailure::new(other.kind(), other.to_string()),
        }
    }
}

/// Result type for bridge calls.
pub type BridgeClientResult<T> = Result<T, BridgeClientError>;

/// Sends requests to a bridge server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BridgeTransport: Send + Sync {
    /// Posts a request and returns the success data.
    async fn send(&self, request: BridgeRequest) -> BridgeClientResult<Value>;
}

/// `reqwest`-backed bridge client.
#[derive(Debug, Clone)]
pub struct BridgeClient {
    http: Client,
    settings: BridgeSettings,
}

impl BridgeClient {
    /// Creates a client for the configured server.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeClientError::Connection`] when the HTTP client cannot
    /// be initialised.
    pub fn new(settings: BridgeSettings) -> BridgeClientResult<Self> {
        let http = Client::builder()
            .build()
            .map_err(|error| BridgeClientError::Connection {
                url: settings.base_url(),
                message: error.to_string(),
            })?;
        Ok(Self { http, settings })
    }

    /// Returns the settings in use.
    #[must_use]
    pub const fn settings(&self) -> &BridgeSettings {
        &self.settings
    }

    /// Fetches `GET /status`.
    ///
    /// # Errors
    ///
    /// Returns a classified [`BridgeClientError`].
    pub async fn status(&self) -> BridgeClientResult<Value> {
        self.get("/status").await
    }

    /// Fetches `GET /info`.
    ///
    /// # Errors
    ///
    /// Returns a classified [`BridgeClientError`].
    pub async fn info(&self) -> BridgeClientResult<Value> {
        self.get("/info").await
    }

    /// Checks that the server answers. Failures are logged, never fatal.
    pub async fn check_connection(&self) -> bool {
        match self.status().await {
            Ok(_) => {
                tracing::info!(url = %self.settings.base_url(), "bridge server reachable");
                true
            }
            Err(error) => {
                tracing::warn!(
                    url = %self.settings.base_url(),
                    error = %error,
                    hint = error.hint(),
                    "bridge server not reachable"
                );
                false
            }
        }
    }

    async fn get(&self, path: &str) -> BridgeClientResult<Value> {
        let url = format!("{}{path}", self.settings.base_url());
        tracing::debug!(url = %url, "GET bridge");
        let response = self
            .http
            .get(&url)
            .timeout(self.settings.timeout())
            .send()
            .await
            .map_err(|error| self.classify(path, &url, &error))?;
        self.read_response(path, response).await
    }

    fn classify(&self, path: &str, url: &str, error: &reqwest::Error) -> BridgeClientError {
        if error.is_timeout() {
            self.timed_out(path)
        } else {
            tracing::warn!(url, error = %error, "bridge connection failed");
            BridgeClientError::Connection {
                url: url.to_owned(),
                message: error.to_string(),
            }
        }
    }

    fn timed_out(&self, path: &str) -> BridgeClientError {
        tracing::warn!(
            path,
            "bridge request timed out; the handler may still complete on the host"
        );
        BridgeClientError::Timeout {
            path: path.to_owned(),
            timeout_ms: u64::try_from(self.settings.timeout().as_millis()).unwrap_or(u64::MAX),
        }
    }

    async fn read_response(&self, path: &str, response: Response) -> BridgeClientResult<Value> {
        let status = response.status().as_u16();
        tracing::debug!(path, status, "bridge responded");
        let protocol = |message: String| BridgeClientError::Protocol {
            path: path.to_owned(),
            message,
            status: Some(status),
        };
        let text = response.text().await.map_err(|error| {
            if error.is_timeout() {
                self.timed_out(path)
            } else {
                protocol(error.to_string())
            }
        })?;
        let body: Value = serde_json::from_str(&text).map_err(|error| {
            let preview: String = text.chars().take(200).collect();
            protocol(format!("body is not JSON ({error}): {preview}"))
        })?;
        match BridgeResponse::from_json(body).map_err(protocol)? {
            BridgeResponse::Success { data } => Ok(data),
            BridgeResponse::Failure(failure) => Err(BridgeClientError::Handler(failure)),
        }
    }
}

#[async_trait]
impl BridgeTransport for BridgeClient {
    async fn send(&self, request: BridgeRequest) -> BridgeClientResult<Value> {
        let url = format!("{}{}", self.settings.base_url(), request.path());
        tracing::info!(path = request.path(), "POST bridge");
        let response = self
            .http
            .post(&url)
            .timeout(self.settings.timeout())
            .json(request.payload())
            .send()
            .await
            .map_err(|error| self.classify(request.path(), &url, &error))?;
        self.read_response(request.path(), response).await
    }
}
