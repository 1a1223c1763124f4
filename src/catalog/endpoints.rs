//! Endpoint paths served by the bridge server.

/// Draw a line in the model.
pub const DRAW_LINE: &str = "/draw_line";
/// List selected model objects.
pub const GET_SELECTED_OBJECTS: &str = "/get_selected_objects";
/// Bake component geometry into the model.
pub const BAKE_GEOMETRY: &str = "/bake_geometry";
/// List open documents.
pub const GET_ACTIVE_GH_FILES: &str = "/get_active_gh_files";
/// Open a document and make it active.
pub const OPEN_DOCUMENT: &str = "/open_document";
/// List sliders of a document.
pub const LIST_SLIDERS: &str = "/list_sliders";
/// Set a slider value.
pub const SET_SLIDER: &str = "/set_slider";
/// List EML parameters across open documents.
pub const LIST_EML_PARAMETERS: &str = "/list_eml_parameters";
/// Read one EML parameter.
pub const GET_EML_PARAMETER_VALUE: &str = "/get_eml_parameter_value";
/// Write one EML parameter.
pub const SET_EML_PARAMETER_VALUE: &str = "/set_eml_parameter_value";
/// Suggest output-to-input connections.
pub const SUGGEST_EML_CONNECTIONS: &str = "/suggest_eml_connections";
/// Transfer an EML output into an EML input.
pub const TRANSFER_EML_PARAMETER: &str = "/transfer_eml_parameter";
/// Run a declared workflow.
pub const RUN_WORKFLOW: &str = "/run_workflow";
