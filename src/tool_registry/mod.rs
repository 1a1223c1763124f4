//! Client-side tool registry.
//!
//! Tool modules declare their tools at process start; [`services::ToolRegistry`]
//! builds the immutable name-to-binding mapping the agent resolves against.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Registry construction and lookup in [`services`]

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
