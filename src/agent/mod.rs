//! Agent-facing tool invocation.
//!
//! [`ToolInvoker`] is what an agent runtime calls: it resolves a tool name
//! in the registry, validates arguments, runs local tools in-process or
//! sends server-side tools over a [`crate::bridge::client::BridgeTransport`],
//! and shapes the result with the agent's own verbosity.

mod invoker;

pub use invoker::{InvocationError, InvocationResult, ToolInvoker};

#[cfg(test)]
mod tests;
