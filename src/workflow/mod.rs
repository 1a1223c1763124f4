//! Declarative multi-document workflows.
//!
//! Workflow documents are loaded from YAML or JSON and validated before any
//! step runs. [`services::WorkflowExecutor`] runs one workflow fail-fast,
//! dispatching every step through the bridge dispatch table so each step
//! gets the same isolation as a direct call.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
