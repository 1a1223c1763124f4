//! Serialized execution of handlers against the single host session.

use super::dispatch::DispatchTable;
use crate::{
    bridge::protocol::{BridgeFailure, BridgeResponse, ErrorKind},
    config::VerbosityFlag,
    host::{domain::HostStatus, session::HostSession},
};
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};

/// Runs dispatches one at a time on the blocking pool.
///
/// The host session sits behind one mutex, so effects of two concurrent
/// requests never interleave. A panicking handler cannot poison the
/// session for later requests.
#[derive(Debug, Clone)]
pub struct SerializedExecutor {
    session: Arc<Mutex<HostSession>>,
    table: Arc<DispatchTable>,
    verbosity: VerbosityFlag,
}

impl SerializedExecutor {
    /// Creates an executor owning the session and table.
    #[must_use]
    pub fn new(session: HostSession, table: DispatchTable, verbosity: VerbosityFlag) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            table: Arc::new(table),
            verbosity,
        }
    }

    /// Returns the dispatch table.
    #[must_use]
    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    /// Returns the shared verbosity flag.
    #[must_use]
    pub const fn verbosity(&self) -> &VerbosityFlag {
        &self.verbosity
    }

    /// Dispatches a request. Verbosity is read when the call starts.
    pub async fn execute(&self, path: String, payload: Value) -> BridgeResponse {
        let session = Arc::clone(&self.session);
        let table = Arc::clone(&self.table);
        let verbose = self.verbosity.is_verbose();
        let task = tokio::task::spawn_blocking(move || {
            let mut guard = session.lock().unwrap_or_else(PoisonError::into_inner);
            table.dispatch(&mut guard, &path, &payload, verbose)
        });
        match task.await {
            Ok(response) => response,
            Err(error) => {
                tracing::error!(error = %error, "handler task failed");
                BridgeResponse::Failure(BridgeFailure::new(
                    ErrorKind::HandlerError,
                    format!("handler task failed: {error}"),
                ))
            }
        }
    }

    /// Reads host availability.
    ///
    /// # Errors
    ///
    /// Returns a handler failure when the blocking task cannot complete.
    pub async fn status(&self) -> Result<HostStatus, BridgeFailure> {
        let session = Arc::clone(&self.session);
        tokio::task::spawn_blocking(move || {
            let guard = session.lock().unwrap_or_else(PoisonError::into_inner);
            guard.host().status()
        })
        .await
        .map_err(|error| {
            BridgeFailure::new(ErrorKind::HandlerError, format!("status task failed: {error}"))
        })
    }
}
