//! Fail-fast workflow executor.

use crate::{
    bridge::{protocol::BridgeResponse, server::HandlerContext},
    catalog::endpoints,
    workflow::domain::{StepAction, StepFailure, StepOutcome, WorkflowDefinition, WorkflowReport, WorkflowStep},
};
use mockable::Clock;
use serde_json::{Value, json};
use std::sync::Arc;

/// Runs workflow steps in order through the dispatch table.
#[derive(Debug, Clone)]
pub struct WorkflowExecutor<C> {
    clock: Arc<C>,
}

impl<C> WorkflowExecutor<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an executor stamping reports with `clock`.
    #[must_use]
    pub const fn new(clock: Arc<C>) -> Self {
        Self { clock }
    }

    /// Runs `workflow` against the handler's session.
    ///
    /// The first failing step aborts the run; its failure is recorded and
    /// the remaining steps are counted as skipped. Effects of completed
    /// steps persist.
    pub fn run(
        &self,
        context: &mut HandlerContext<'_>,
        workflow: &WorkflowDefinition,
    ) -> WorkflowReport {
        let started_at = self.clock.utc();
        let total = workflow.steps.len();
        let mut completed = Vec::with_capacity(total);
        let mut failure = None;

        for (position, step) in workflow.steps.iter().enumerate() {
            let number = position.saturating_add(1);
            let action = step.action.name();
            let (path, payload) = step_request(step);
            tracing::info!(
                workflow = %workflow.name,
                step = number,
                action,
                file = %step.file,
                "running workflow step"
            );
            match context
                .endpoints
                .dispatch(context.session, path, &payload, context.verbose)
            {
                BridgeResponse::Success { data } => completed.push(StepOutcome {
                    step: number,
                    file: step.file.clone(),
                    action,
                    data,
                }),
                BridgeResponse::Failure(reported) => {
                    tracing::warn!(
                        workflow = %workflow.name,
                        step = number,
                        action,
                        error = %reported,
                        "workflow aborted"
                    );
                    failure = Some(StepFailure::new(number, &step.file, action, reported));
                    break;
                }
            }
        }

        let skipped = if failure.is_some() {
            total.saturating_sub(completed.len()).saturating_sub(1)
        } else {
            0
        };
        WorkflowReport {
            workflow: workflow.name.clone(),
            completed,
            failure,
            skipped,
            started_at,
            finished_at: self.clock.utc(),
        }
    }
}

fn step_request(step: &WorkflowStep) -> (&'static str, Value) {
    match &step.action {
        StepAction::Open => (endpoints::OPEN_DOCUMENT, json!({"file_name": step.file})),
        StepAction::SetParameter { parameter, value } => (
            endpoints::SET_EML_PARAMETER_VALUE,
            json!({"file_name": step.file, "parameter_name": parameter, "value": value}),
        ),
        StepAction::TransferGeometry {
            source_file,
            source_parameter,
            target_parameter,
        } => (
            endpoints::TRANSFER_EML_PARAMETER,
            json!({
                "source_file": source_file,
                "source_parameter": source_parameter,
                "target_file": step.file,
                "target_parameter": target_parameter,
            }),
        ),
        StepAction::Bake { parameter, layer } => (
            endpoints::BAKE_GEOMETRY,
            json!({"file_name": step.file, "parameter_name": parameter, "layer": layer}),
        ),
    }
}
