//! Unit tests for the EML module.

mod correlator_tests;
mod domain_tests;
