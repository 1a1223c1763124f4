//! Solver tools: documents, sliders, EML parameters, and workflows.

use super::endpoints;
use crate::{
    bridge::{
        protocol::ErrorKind,
        server::{
            Arguments, EndpointHandler, EndpointModule, EndpointRegistration, HandlerContext,
            HandlerFault, HandlerResult,
        },
    },
    eml::{
        domain::prepare_write,
        services::{EmlCorrelator, TransferRequest},
    },
    host::domain::{ComponentKind, DocumentName, ParamValue},
    tool_registry::{
        domain::{ParameterKind, ParameterSpec, ToolDescriptor, ToolRegistryResult},
        ports::{ToolDeclaration, ToolModule},
    },
    workflow::{domain::WorkflowDocument, services::WorkflowExecutor},
};
use mockable::Clock;
use serde_json::{Value, json};
use std::sync::Arc;

fn file_parameter() -> ParameterSpec {
    ParameterSpec::optional(
        ParameterKind::String,
        "Document name, e.g. 'massing.gh' (default: active document)",
    )
}

fn parameter_name() -> ParameterSpec {
    ParameterSpec::required(
        ParameterKind::String,
        "EML parameter by full name (eml_input_height) or logical name (height)",
    )
}

/// Agent-side declarations of the solver tools.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrasshopperTools;

impl ToolModule for GrasshopperTools {
    fn module_name(&self) -> &'static str {
        "grasshopper"
    }

    fn tools(&self) -> ToolRegistryResult<Vec<ToolDeclaration>> {
        let descriptors = vec![
            ToolDescriptor::server(
                "get_active_gh_files",
                "Lists the open solver documents and which one is active.",
            )?
            .with_endpoint(endpoints::GET_ACTIVE_GH_FILES),
            ToolDescriptor::server(
                "open_document",
                "Opens a solver document if needed and makes it the active document.",
            )?
            .with_endpoint(endpoints::OPEN_DOCUMENT)
            .with_parameter(
                "file_name",
                ParameterSpec::required(ParameterKind::String, "Document to open"),
            ),
            ToolDescriptor::server(
                "list_grasshopper_sliders",
                "Activates a document and lists its number sliders with bounds and values.",
            )?
            .with_endpoint(endpoints::LIST_SLIDERS)
            .with_parameter(
                "file_name",
                ParameterSpec::required(ParameterKind::String, "Document to scan"),
            ),
            ToolDescriptor::server(
                "set_grasshopper_slider",
                "Activates a document and sets a slider by nickname. Values outside the bounds are clamped.",
            )?
            .with_endpoint(endpoints::SET_SLIDER)
            .with_parameter(
                "file_name",
                ParameterSpec::required(ParameterKind::String, "Document holding the slider"),
            )
            .with_parameter(
                "slider_name",
                ParameterSpec::required(ParameterKind::String, "Slider nickname"),
            )
            .with_parameter(
                "new_value",
                ParameterSpec::required(ParameterKind::Number, "Value to set"),
            ),
            ToolDescriptor::server(
                "list_eml_parameters",
                "Discovers eml_input_* and eml_output_* parameters across all open documents, grouped by logical name.",
            )?
            .with_endpoint(endpoints::LIST_EML_PARAMETERS),
            ToolDescriptor::server(
                "get_eml_parameter_value",
                "Reads the current value of one EML parameter.",
            )?
            .with_endpoint(endpoints::GET_EML_PARAMETER_VALUE)
            .with_parameter("parameter_name", parameter_name())
            .with_parameter("file_name", file_parameter()),
            ToolDescriptor::server(
                "set_eml_parameter_value",
                "Writes one EML parameter and recomputes its document. Sliders clamp; value lists accept known items only.",
            )?
            .with_endpoint(endpoints::SET_EML_PARAMETER_VALUE)
            .with_parameter("parameter_name", parameter_name())
            .with_parameter(
                "value",
                ParameterSpec::required(ParameterKind::Any, "Value matching the parameter type"),
            )
            .with_parameter("file_name", file_parameter()),
            ToolDescriptor::server(
                "suggest_eml_connections",
                "Proposes output-to-input connections between open documents sharing a logical name, exact matches first.",
            )?
            .with_endpoint(endpoints::SUGGEST_EML_CONNECTIONS),
            ToolDescriptor::server(
                "transfer_eml_parameter",
                "Copies an EML output into an EML input of another document, converting compatible types, then recomputes the target.",
            )?
            .with_endpoint(endpoints::TRANSFER_EML_PARAMETER)
            .with_parameter(
                "source_parameter",
                ParameterSpec::required(ParameterKind::String, "Output parameter"),
            )
            .with_parameter(
                "target_parameter",
                ParameterSpec::required(ParameterKind::String, "Input parameter"),
            )
            .with_parameter("source_file", file_parameter())
            .with_parameter("target_file", file_parameter()),
            ToolDescriptor::server(
                "run_eml_workflow",
                "Runs a declared workflow step by step, stopping at the first failing step.",
            )?
            .with_endpoint(endpoints::RUN_WORKFLOW)
            .with_parameter(
                "workflow_document",
                ParameterSpec::required(
                    ParameterKind::Object,
                    "Workflow document with files and workflows",
                ),
            )
            .with_parameter(
                "workflow_name",
                ParameterSpec::required(ParameterKind::String, "Workflow to run"),
            ),
        ];
        Ok(descriptors.into_iter().map(ToolDeclaration::bridge).collect())
    }
}

/// Host-side handlers of the solver tools.
#[derive(Debug, Clone)]
pub struct GrasshopperEndpoints<C> {
    clock: Arc<C>,
}

impl<C> GrasshopperEndpoints<C> {
    /// Creates the module; `clock` stamps workflow reports.
    #[must_use]
    pub const fn new(clock: Arc<C>) -> Self {
        Self { clock }
    }
}

impl<C> EndpointModule for GrasshopperEndpoints<C>
where
    C: Clock + Send + Sync + 'static,
{
    fn module_name(&self) -> &'static str {
        "grasshopper"
    }

    fn endpoints(&self) -> Vec<EndpointRegistration> {
        vec![
            EndpointRegistration::new(
                endpoints::GET_ACTIVE_GH_FILES,
                "List open documents",
                handle_get_active_gh_files,
            ),
            EndpointRegistration::new(
                endpoints::OPEN_DOCUMENT,
                "Open and activate a document",
                handle_open_document,
            ),
            EndpointRegistration::new(endpoints::LIST_SLIDERS, "List sliders", handle_list_sliders),
            EndpointRegistration::new(endpoints::SET_SLIDER, "Set a slider", handle_set_slider),
            EndpointRegistration::new(
                endpoints::LIST_EML_PARAMETERS,
                "Discover EML parameters",
                handle_list_eml_parameters,
            ),
            EndpointRegistration::new(
                endpoints::GET_EML_PARAMETER_VALUE,
                "Read an EML parameter",
                handle_get_eml_parameter_value,
            ),
            EndpointRegistration::new(
                endpoints::SET_EML_PARAMETER_VALUE,
                "Write an EML parameter",
                handle_set_eml_parameter_value,
            ),
            EndpointRegistration::new(
                endpoints::SUGGEST_EML_CONNECTIONS,
                "Suggest EML connections",
                handle_suggest_eml_connections,
            ),
            EndpointRegistration::new(
                endpoints::TRANSFER_EML_PARAMETER,
                "Transfer an EML parameter",
                handle_transfer_eml_parameter,
            ),
            EndpointRegistration::new(
                endpoints::RUN_WORKFLOW,
                "Run a workflow",
                RunWorkflow {
                    executor: WorkflowExecutor::new(Arc::clone(&self.clock)),
                },
            ),
        ]
    }
}

fn handle_get_active_gh_files(context: &mut HandlerContext<'_>, _payload: &Value) -> HandlerResult {
    let active = context.session.active_document().cloned();
    let open = context.session.host().open_documents();
    let files: Vec<Value> = open
        .iter()
        .map(|document| {
            json!({
                "name": document.as_str(),
                "active": active.as_ref() == Some(document),
            })
        })
        .collect();
    Ok(json!({
        "open_files": files,
        "active_file": active.as_ref().map(DocumentName::as_str),
        "count": open.len(),
        "message": format!("Found {} open document(s)", open.len()),
    }))
}

fn activate(context: &mut HandlerContext<'_>, arguments: Arguments<'_>) -> Result<DocumentName, HandlerFault> {
    let document = DocumentName::new(arguments.required_str("file_name")?)?;
    context.session.activate(&document)?;
    Ok(document)
}

fn handle_open_document(context: &mut HandlerContext<'_>, payload: &Value) -> HandlerResult {
    let document = activate(context, Arguments::new(payload))?;
    tracing::info!(file = %document, "document activated");
    Ok(json!({
        "file_name": document.as_str(),
        "active": true,
        "message": format!("'{document}' is now the active document"),
    }))
}

fn handle_list_sliders(context: &mut HandlerContext<'_>, payload: &Value) -> HandlerResult {
    let document = activate(context, Arguments::new(payload))?;
    let host = context.session.host();
    let mut sliders = Vec::new();
    for component in host.components(&document)? {
        if let ComponentKind::Slider { min, max, decimals } = component.kind {
            sliders.push(json!({
                "name": component.name,
                "current_value": host.read_value(&document, component.id)?.to_json(),
                "min_value": min,
                "max_value": max,
                "precision": decimals,
            }));
        }
    }
    Ok(json!({
        "file_name": document.as_str(),
        "count": sliders.len(),
        "message": format!("Found {} slider components", sliders.len()),
        "sliders": sliders,
    }))
}

fn handle_set_slider(context: &mut HandlerContext<'_>, payload: &Value) -> HandlerResult {
    let arguments = Arguments::new(payload);
    let document = activate(context, arguments)?;
    let slider_name = arguments.required_str("slider_name")?;
    let requested = arguments.required_f64("new_value")?;

    let slider = context
        .session
        .host()
        .components(&document)?
        .into_iter()
        .find(|component| {
            component.name == slider_name && matches!(component.kind, ComponentKind::Slider { .. })
        })
        .ok_or_else(|| {
            HandlerFault::new(
                ErrorKind::ValidationError,
                "SliderNotFound",
                format!("Slider '{slider_name}' not found in '{document}'"),
            )
            .with_hint("Use list_grasshopper_sliders to see the available sliders.")
        })?;

    let host = context.session.host_mut();
    let previous = host.read_value(&document, slider.id)?;
    let prepared = prepare_write(slider_name, &slider.kind, ParamValue::Number(requested))?;
    host.write_value(&document, slider.id, prepared.value.clone())?;
    host.recompute(&document)?;

    let written = prepared.value.to_json();
    let message = if prepared.clamped {
        format!("Slider '{slider_name}' updated to {written} (clamped from {requested})")
    } else {
        format!("Slider '{slider_name}' updated to {written}")
    };
    Ok(json!({
        "file_name": document.as_str(),
        "slider_name": slider_name,
        "old_value": previous.to_json(),
        "new_value": written,
        "clamped": prepared.clamped,
        "message": message,
    }))
}

fn handle_list_eml_parameters(context: &mut HandlerContext<'_>, _payload: &Value) -> HandlerResult {
    let catalog = EmlCorrelator::new(context.session).discover()?;
    let mut rendered = catalog.to_json();
    if let Some(object) = rendered.as_object_mut() {
        object.insert(
            "message".to_owned(),
            Value::from(format!(
                "Found {} EML parameter(s) in {} logical group(s)",
                catalog.len(),
                catalog.groups.len()
            )),
        );
    }
    Ok(rendered)
}

fn handle_get_eml_parameter_value(context: &mut HandlerContext<'_>, payload: &Value) -> HandlerResult {
    let arguments = Arguments::new(payload);
    let parameter = EmlCorrelator::new(context.session).find(
        arguments.optional_str("file_name")?,
        arguments.required_str("parameter_name")?,
    )?;
    Ok(json!({ "parameter": parameter.to_json() }))
}

fn handle_set_eml_parameter_value(context: &mut HandlerContext<'_>, payload: &Value) -> HandlerResult {
    let arguments = Arguments::new(payload);
    let outcome = EmlCorrelator::new(context.session).write(
        arguments.optional_str("file_name")?,
        arguments.required_str("parameter_name")?,
        arguments.required("value")?,
    )?;
    Ok(outcome.to_json())
}

fn handle_suggest_eml_connections(context: &mut HandlerContext<'_>, _payload: &Value) -> HandlerResult {
    let suggestions = EmlCorrelator::new(context.session).suggest()?;
    Ok(json!({
        "count": suggestions.len(),
        "suggestions": suggestions,
    }))
}

fn handle_transfer_eml_parameter(context: &mut HandlerContext<'_>, payload: &Value) -> HandlerResult {
    let request: TransferRequest = Arguments::new(payload).parse()?;
    let outcome = EmlCorrelator::new(context.session).transfer(&request)?;
    Ok(outcome.to_json())
}

struct RunWorkflow<C> {
    executor: WorkflowExecutor<C>,
}

impl<C> EndpointHandler for RunWorkflow<C>
where
    C: Clock + Send + Sync,
{
    fn handle(&self, context: &mut HandlerContext<'_>, payload: &Value) -> HandlerResult {
        let arguments = Arguments::new(payload);
        let name = arguments.required_str("workflow_name")?;
        let document = WorkflowDocument::from_value(arguments.required("workflow_document")?.clone())?;
        let workflow = document.workflow(name)?;
        let report = self.executor.run(context, workflow);
        let rendered = serde_json::to_value(&report).map_err(|error| {
            HandlerFault::new(ErrorKind::HandlerError, "SerializationError", error.to_string())
        })?;
        if let Some(failure) = report.failure {
            return Err(HandlerFault::new(
                failure.error_type,
                "WorkflowAborted",
                format!(
                    "Workflow '{name}' aborted at step {} ({}): {}",
                    failure.step, failure.action, failure.error
                ),
            )
            .with_hint(failure.debug_hint)
            .with_details(json!({ "report": rendered })));
        }
        Ok(json!({
            "report": rendered,
            "message": format!("Workflow '{name}' completed {} step(s)", report.completed.len()),
        }))
    }
}
