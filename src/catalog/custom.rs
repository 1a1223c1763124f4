//! Local tools that run in the agent process without the bridge.

use crate::tool_registry::{
    domain::{ParameterKind, ParameterSpec, ToolDescriptor, ToolRegistryResult},
    ports::{LocalToolError, ToolDeclaration, ToolModule},
};
use mockable::{Clock, DefaultClock};
use serde_json::{Value, json};
use std::num::FpCategory;

/// Connectivity and smoke-test tools.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomTools;

impl ToolModule for CustomTools {
    fn module_name(&self) -> &'static str {
        "custom"
    }

    fn tools(&self) -> ToolRegistryResult<Vec<ToolDeclaration>> {
        Ok(vec![
            ToolDeclaration::local(
                ToolDescriptor::local(
                    "hello_world",
                    "Returns a greeting without touching the host. Use it to check the agent is wired up.",
                )?,
                hello_world,
            ),
            ToolDeclaration::local(
                ToolDescriptor::local("simple_math", "Adds, subtracts, multiplies, or divides two numbers.")?
                    .with_parameter("a", ParameterSpec::required(ParameterKind::Number, "First number"))
                    .with_parameter("b", ParameterSpec::required(ParameterKind::Number, "Second number"))
                    .with_parameter(
                        "operation",
                        ParameterSpec::optional(
                            ParameterKind::String,
                            "One of add, subtract, multiply, divide (default add)",
                        ),
                    ),
                simple_math,
            ),
            ToolDeclaration::local(
                ToolDescriptor::local("echo_message", "Echoes a message back with word statistics.")?
                    .with_parameter(
                        "message",
                        ParameterSpec::required(ParameterKind::String, "Message to echo"),
                    ),
                echo_message,
            ),
        ])
    }
}

fn hello_world(_arguments: &Value) -> Result<Value, LocalToolError> {
    Ok(json!({
        "message": "Hello from the rhino bridge agent (no host required)",
        "timestamp": DefaultClock.utc().to_rfc3339(),
        "test_status": "agent tool wiring is working",
    }))
}

fn number(arguments: &Value, key: &str) -> Result<f64, LocalToolError> {
    arguments
        .get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| LocalToolError::new(format!("argument '{key}' must be a number")))
}

#[expect(clippy::float_arithmetic, reason = "this tool is a calculator")]
fn simple_math(arguments: &Value) -> Result<Value, LocalToolError> {
    let a = number(arguments, "a")?;
    let b = number(arguments, "b")?;
    let operation = arguments
        .get("operation")
        .and_then(Value::as_str)
        .unwrap_or("add")
        .to_ascii_lowercase();
    let result = match operation.as_str() {
        "add" => a + b,
        "subtract" => a - b,
        "multiply" => a * b,
        "divide" if b.classify() == FpCategory::Zero => {
            return Err(LocalToolError::new("Division by zero"));
        }
        "divide" => a / b,
        other => {
            return Err(LocalToolError::new(format!(
                "Unknown operation: {other}. Use: add, subtract, multiply, divide"
            )));
        }
    };
    Ok(json!({
        "operation": operation,
        "input_a": a,
        "input_b": b,
        "result": result,
        "message": format!("{a} {operation} {b} = {result}"),
    }))
}

fn echo_message(arguments: &Value) -> Result<Value, LocalToolError> {
    let message = arguments
        .get("message")
        .and_then(Value::as_str)
        .ok_or_else(|| LocalToolError::new("argument 'message' must be a string"))?;
    Ok(json!({
        "original_message": message,
        "echoed_message": message,
        "message_length": message.chars().count(),
        "word_count": message.split_whitespace().count(),
        "message": format!("Echo: {message}"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("add", 6.0)]
    #[case("subtract", 2.0)]
    #[case("multiply", 8.0)]
    #[case("DIVIDE", 2.0)]
    fn simple_math_applies_the_operation(#[case] operation: &str, #[case] expected: f64) {
        let output = simple_math(&json!({"a": 4, "b": 2, "operation": operation}))
            .expect("valid operation");
        assert_eq!(output.get("result").and_then(Value::as_f64), Some(expected));
    }

    #[rstest]
    fn simple_math_defaults_to_addition() {
        let output = simple_math(&json!({"a": 1.5, "b": 2})).expect("valid operation");
        assert_eq!(output.get("operation"), Some(&json!("add")));
        assert_eq!(output.get("result").and_then(Value::as_f64), Some(3.5));
    }

    #[rstest]
    fn division_by_zero_is_reported() {
        let error = simple_math(&json!({"a": 1, "b": 0, "operation": "divide"}))
            .expect_err("division by zero");
        assert_eq!(error.message(), "Division by zero");
    }

    #[rstest]
    fn unknown_operations_are_reported() {
        let error = simple_math(&json!({"a": 1, "b": 1, "operation": "modulo"}))
            .expect_err("unknown operation");
        assert!(error.message().starts_with("Unknown operation: modulo"));
    }

    #[rstest]
    fn echo_counts_words_and_characters() {
        let output = echo_message(&json!({"message": "héllo  brave world"})).expect("echo");
        assert_eq!(output.get("word_count"), Some(&json!(3)));
        assert_eq!(output.get("message_length"), Some(&json!(18)));
        assert_eq!(output.get("message"), Some(&json!("Echo: héllo  brave world")));
    }

    #[rstest]
    fn hello_world_needs_no_arguments() {
        let output = hello_world(&Value::Null).expect("greeting");
        assert!(output.get("timestamp").is_some());
    }
}
