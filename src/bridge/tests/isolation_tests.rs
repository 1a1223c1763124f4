//! Tests for the failure-isolation boundary.

use crate::bridge::{
    protocol::ErrorKind,
    server::{HandlerFault, isolation::run_isolated},
};
use rstest::rstest;
use serde_json::json;

#[rstest]
fn missing_success_flag_is_added() {
    let output = run_isolated("/ok", false, || Ok(json!({"value": 3}))).expect("handler succeeds");
    assert_eq!(output.get("success"), Some(&json!(true)));
    assert!(output.get("timing").is_some());
}

#[rstest]
#[case(json!(null), "null")]
#[case(json!([1, 2]), "an array")]
#[case(json!("text"), "a string")]
fn non_object_returns_are_handler_errors(#[case] returned: serde_json::Value, #[case] label: &str) {
    let failure = run_isolated("/bad", false, || Ok(returned)).expect_err("non-object is rejected");
    assert_eq!(failure.error_type, ErrorKind::HandlerError);
    assert_eq!(failure.exception_type.as_deref(), Some("InvalidReturnType"));
    assert!(failure.message.contains(label));
}

#[rstest]
fn reported_failures_keep_their_classification() {
    let failure = run_isolated("/reported", false, || {
        Ok(json!({
            "success": false,
            "error": "slider not found",
            "error_type": "ValidationError",
            "debug_hint": "list sliders first",
        }))
    })
    .expect_err("reported failure");
    assert_eq!(failure.error_type, ErrorKind::ValidationError);
    assert_eq!(failure.message, "slider not found");
    assert_eq!(failure.debug_hint, "list sliders first");
}

#[rstest]
fn faults_carry_location_and_verbose_trace() {
    let quiet = run_isolated("/fault", false, || {
        Err(HandlerFault::validation("missing argument 'x'"))
    })
    .expect_err("fault is reported");
    assert_eq!(quiet.error_type, ErrorKind::ValidationError);
    assert!(quiet.trace.is_none());
    assert!(
        quiet
            .file_line
            .as_deref()
            .is_some_and(|location| location.contains("isolation_tests.rs"))
    );

    let verbose = run_isolated("/fault", true, || Err(HandlerFault::validation("again")))
        .expect_err("fault is reported");
    assert!(verbose.trace.is_some());
}

#[rstest]
fn panics_become_handler_errors() {
    let failure = run_isolated("/panic", true, || -> crate::bridge::server::HandlerResult {
        panic!("host exploded")
    })
    .expect_err("panic is caught");
    assert_eq!(failure.error_type, ErrorKind::HandlerError);
    assert_eq!(failure.exception_type.as_deref(), Some("panic"));
    assert!(failure.message.contains("host exploded"));
    assert!(failure.file_line.is_some());
    assert!(failure.trace.is_some());

    let after = run_isolated("/ok", false, || Ok(json!({}))).expect("later calls still work");
    assert_eq!(after.get("success"), Some(&json!(true)));
}
