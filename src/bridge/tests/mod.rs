//! Unit tests for the bridge server.

mod isolation_tests;
