//! Adapter implementations for the modeling host port.

pub mod demo;
pub mod memory;

pub use demo::demo_host;
pub use memory::{InMemoryDocument, InMemoryHost};
