//! Registry construction and lookup.

mod registry;

pub use registry::ToolRegistry;
