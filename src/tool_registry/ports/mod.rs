//! Port contracts for tool declaration.

mod module;

pub use module::{LocalToolError, LocalToolFn, ToolBinding, ToolDeclaration, ToolModule};
