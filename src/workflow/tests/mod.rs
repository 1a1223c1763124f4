//! Unit tests for workflow loading and execution.
