//! Workflow declarations and execution reports.

mod document;
mod error;
mod report;

pub use document::{FileDeclaration, StepAction, WorkflowDefinition, WorkflowDocument, WorkflowStep};
pub use error::{WorkflowError, WorkflowResult};
pub use report::{StepFailure, StepOutcome, WorkflowReport};
