//! Unit tests for the host module.

mod session_tests;
