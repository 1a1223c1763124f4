//! Unit tests for the tool catalog.

mod handler_tests;
