//! Workflow execution.

mod executor;

pub use executor::WorkflowExecutor;
