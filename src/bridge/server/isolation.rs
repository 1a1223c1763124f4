//! Failure-isolation boundary around handler execution.
//!
//! Handler faults and panics become classified failures; the server never
//! goes down with a handler. Successful output is normalised to a JSON
//! object carrying `success: true` and a `timing` diagnostic.

use super::fault::HandlerResult;
use crate::bridge::protocol::{BridgeFailure, ErrorKind};
use serde_json::{Map, Value, json};
use std::{
    any::Any,
    backtrace::Backtrace,
    cell::{Cell, RefCell},
    panic::{self, AssertUnwindSafe},
    sync::Once,
    time::Instant,
};

const INVALID_RETURN: &str = "InvalidReturnType";

#[derive(Debug)]
struct PanicRecord {
    location: Option<String>,
    backtrace: String,
}

thread_local! {
    static ISOLATING: Cell<bool> = const { Cell::new(false) };
    static LAST_PANIC: RefCell<Option<PanicRecord>> = const { RefCell::new(None) };
}

static HOOK: Once = Once::new();

fn install_panic_hook() {
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if ISOLATING.with(Cell::get) {
                let record = PanicRecord {
                    location: info
                        .location()
                        .map(|location| format!("{}:{}", location.file(), location.line())),
                    backtrace: Backtrace::force_capture().to_string(),
                };
                LAST_PANIC.with(|slot| *slot.borrow_mut() = Some(record));
            } else {
                previous(info);
            }
        }));
    });
}

/// Runs `call` inside the isolation boundary.
///
/// # Errors
///
/// Returns a [`BridgeFailure`] when the handler faults, panics, returns a
/// non-object, or reports `success: false`.
pub fn run_isolated<F>(path: &str, verbose: bool, call: F) -> Result<Value, BridgeFailure>
where
    F: FnOnce() -> HandlerResult,
{
    install_panic_hook();
    let started = Instant::now();
    let enclosing = ISOLATING.with(|flag| flag.replace(true));
    let outcome = panic::catch_unwind(AssertUnwindSafe(call));
    ISOLATING.with(|flag| flag.set(enclosing));
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    match outcome {
        Ok(Ok(value)) => normalise(path, value, elapsed_ms),
        Ok(Err(fault)) => {
            tracing::warn!(path, kind = %fault.kind(), error = fault.message(), "handler failed");
            Err(fault.into_failure(verbose))
        }
        Err(payload) => Err(panic_failure(path, payload.as_ref(), verbose)),
    }
}

fn normalise(path: &str, value: Value, elapsed_ms: u64) -> Result<Value, BridgeFailure> {
    let mut object = match value {
        Value::Object(object) => object,
        other => {
            tracing::error!(path, returned = value_kind(&other), "handler returned a non-object");
            return Err(invalid_return(format!(
                "handler for {path} returned {} instead of a JSON object",
                value_kind(&other)
            )));
        }
    };
    match object.get("success") {
        None => {
            object.insert("success".to_owned(), Value::Bool(true));
        }
        Some(Value::Bool(true)) => {}
        Some(Value::Bool(false)) => return Err(reported_failure(path, object)),
        Some(other) => {
            return Err(invalid_return(format!(
                "handler for {path} returned a non-boolean success flag: {other}"
            )));
        }
    }
    object.insert("timing".to_owned(), json!({"elapsed_ms": elapsed_ms}));
    Ok(Value::Object(object))
}

fn reported_failure(path: &str, mut object: Map<String, Value>) -> BridgeFailure {
    let kind = object
        .remove("error_type")
        .and_then(|raw| serde_json::from_value::<ErrorKind>(raw).ok())
        .unwrap_or(ErrorKind::HandlerError);
    let message = ["error", "message"]
        .into_iter()
        .find_map(|key| object.get(key).and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| format!("handler for {path} reported failure"));
    tracing::warn!(path, kind = %kind, error = %message, "handler reported failure");
    let mut failure = BridgeFailure::new(kind, message);
    if let Some(hint) = object.get("debug_hint").and_then(Value::as_str) {
        failure = failure.with_hint(hint);
    }
    failure
}

fn invalid_return(message: String) -> BridgeFailure {
    let mut failure = BridgeFailure::new(ErrorKind::HandlerError, message)
        .with_hint("Handlers must return a JSON object. Check the handler's return value.");
    failure.exception_type = Some(INVALID_RETURN.to_owned());
    failure
}

fn panic_failure(path: &str, payload: &(dyn Any + Send), verbose: bool) -> BridgeFailure {
    let message = payload
        .downcast_ref::<&str>()
        .map(|text| (*text).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "handler panicked".to_owned());
    let record = LAST_PANIC.with(|slot| slot.borrow_mut().take());
    tracing::error!(
        path,
        error = %message,
        location = record.as_ref().and_then(|found| found.location.as_deref()),
        "handler panicked; server continues"
    );
    let mut failure = BridgeFailure::new(ErrorKind::HandlerError, format!("Handler error: {message}"));
    failure.exception_type = Some("panic".to_owned());
    if let Some(found) = record {
        failure.file_line = found.location;
        if verbose {
            failure.trace = Some(found.backtrace);
        }
    }
    failure
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
