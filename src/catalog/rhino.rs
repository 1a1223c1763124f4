//! Model tools: drawing, selection, and baking.

use super::endpoints;
use crate::{
    bridge::server::{
        Arguments, EndpointModule, EndpointRegistration, HandlerContext, HandlerFault,
        HandlerResult,
    },
    debug_filter::ResponseShape,
    eml::services::EmlCorrelator,
    host::domain::{ComponentId, DocumentName, HostObject, Point3},
    tool_registry::{
        domain::{ParameterKind, ParameterSpec, ToolDescriptor, ToolRegistryResult},
        ports::{ToolDeclaration, ToolModule},
    },
};
use serde_json::{Value, json};

const COORDINATES: [(&str, &str); 6] = [
    ("start_x", "X coordinate of the line start"),
    ("start_y", "Y coordinate of the line start"),
    ("start_z", "Z coordinate of the line start"),
    ("end_x", "X coordinate of the line end"),
    ("end_y", "Y coordinate of the line end"),
    ("end_z", "Z coordinate of the line end"),
];

/// Selection output is the point of the call, so full objects stay.
const SELECTION_SHAPE: ResponseShape = ResponseShape::new(&["host_objects"], &[]);

/// Agent-side declarations of the model tools.
#[derive(Debug, Clone, Copy, Default)]
pub struct RhinoTools;

impl ToolModule for RhinoTools {
    fn module_name(&self) -> &'static str {
        "rhino"
    }

    fn tools(&self) -> ToolRegistryResult<Vec<ToolDeclaration>> {
        let draw_line = COORDINATES.iter().fold(
            ToolDescriptor::server(
                "draw_line_rhino",
                "Draws a line between two points in the model, in model units.",
            )?
            .with_endpoint(endpoints::DRAW_LINE),
            |descriptor, (name, description)| {
                descriptor.with_parameter(
                    *name,
                    ParameterSpec::required(ParameterKind::Number, *description),
                )
            },
        );
        Ok(vec![
            ToolDeclaration::bridge(draw_line),
            ToolDeclaration::bridge(
                ToolDescriptor::server(
                    "get_selected_objects",
                    "Lists the objects currently selected in the model.",
                )?
                .with_endpoint(endpoints::GET_SELECTED_OBJECTS)
                .with_shape(SELECTION_SHAPE),
            ),
            ToolDeclaration::bridge(
                ToolDescriptor::server(
                    "bake_geometry",
                    "Bakes the geometry held by a component into the model.",
                )?
                .with_endpoint(endpoints::BAKE_GEOMETRY)
                .with_parameter(
                    "parameter_name",
                    ParameterSpec::required(
                        ParameterKind::String,
                        "Component nickname, or EML parameter by full or logical name",
                    ),
                )
                .with_parameter(
                    "file_name",
                    ParameterSpec::optional(
                        ParameterKind::String,
                        "Document holding the component (default: active document)",
                    ),
                )
                .with_parameter(
                    "layer",
                    ParameterSpec::optional(ParameterKind::String, "Target layer (default: Baked)"),
                ),
            ),
        ])
    }
}

/// Host-side handlers of the model tools.
#[derive(Debug, Clone, Copy, Default)]
pub struct RhinoEndpoints;

impl EndpointModule for RhinoEndpoints {
    fn module_name(&self) -> &'static str {
        "rhino"
    }

    fn endpoints(&self) -> Vec<EndpointRegistration> {
        vec![
            EndpointRegistration::new(endpoints::DRAW_LINE, "Draw a line", handle_draw_line),
            EndpointRegistration::new(
                endpoints::GET_SELECTED_OBJECTS,
                "List selected objects",
                handle_get_selected_objects,
            )
            .with_shape(SELECTION_SHAPE),
            EndpointRegistration::new(
                endpoints::BAKE_GEOMETRY,
                "Bake component geometry",
                handle_bake_geometry,
            ),
        ]
    }
}

fn point(arguments: Arguments<'_>, prefix: &str) -> Result<Point3, HandlerFault> {
    Ok(Point3::new(
        arguments.required_f64(&format!("{prefix}_x"))?,
        arguments.required_f64(&format!("{prefix}_y"))?,
        arguments.required_f64(&format!("{prefix}_z"))?,
    ))
}

const fn coordinates(point: Point3) -> [f64; 3] {
    [point.x, point.y, point.z]
}

fn handle_draw_line(context: &mut HandlerContext<'_>, payload: &Value) -> HandlerResult {
    let arguments = Arguments::new(payload);
    let start = point(arguments, "start")?;
    let end = point(arguments, "end")?;
    let line = context.session.host_mut().draw_line(start, end)?;
    let length = start.distance_to(end);
    Ok(json!({
        "line_id": line.id,
        "start_point": coordinates(start),
        "end_point": coordinates(end),
        "length": length,
        "layer": line.layer,
        "message": format!("Line created successfully with length {length:.2}"),
    }))
}

fn summary(object: &HostObject) -> Value {
    json!({
        "id": object.id,
        "layer": object.layer,
        "type": object.geometry.class(),
    })
}

fn handle_get_selected_objects(context: &mut HandlerContext<'_>, _payload: &Value) -> HandlerResult {
    let selected = context.session.host().selected_objects()?;
    Ok(json!({
        "objects": selected.iter().map(summary).collect::<Vec<_>>(),
        "count": selected.len(),
        "host_objects": selected,
    }))
}

fn resolve_component(
    context: &mut HandlerContext<'_>,
    document: &DocumentName,
    name: &str,
) -> Result<ComponentId, HandlerFault> {
    let by_nickname = context
        .session
        .host()
        .components(document)?
        .into_iter()
        .find(|component| component.name == name);
    match by_nickname {
        Some(component) => Ok(component.id),
        None => {
            let parameter =
                EmlCorrelator::new(context.session).find(Some(document.as_str()), name)?;
            Ok(parameter.component)
        }
    }
}

fn handle_bake_geometry(context: &mut HandlerContext<'_>, payload: &Value) -> HandlerResult {
    let arguments = Arguments::new(payload);
    let parameter_name = arguments.required_str("parameter_name")?;
    let layer = arguments.optional_str("layer")?;
    let document = context
        .session
        .resolve_document(arguments.optional_str("file_name")?)?;
    let component = resolve_component(context, &document, parameter_name)?;
    let baked = context
        .session
        .host_mut()
        .bake(&document, component, layer)?;
    tracing::info!(file = %document, parameter = parameter_name, count = baked.len(), "baked geometry");
    Ok(json!({
        "file_name": document.as_str(),
        "parameter_name": parameter_name,
        "object_ids": baked.iter().map(|object| object.id).collect::<Vec<_>>(),
        "layer": baked.first().map(|object| object.layer.clone()),
        "count": baked.len(),
        "message": format!("Baked {} object(s) from '{parameter_name}'", baked.len()),
        "host_objects": baked,
    }))
}
