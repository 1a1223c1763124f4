//! Workflow runs over HTTP.

use crate::bridge_http::helpers::TestBridge;
use rhino_bridge::{
    bridge::protocol::ErrorKind,
    catalog::endpoints,
    host::{adapters::demo::MASSING_DOCUMENT, domain::ParamValue},
    workflow::domain::WorkflowDocument,
};
use serde_json::{Value, json};

const DOCUMENT: &str = r"
files:
  - filename: site.gh
    description: Site analysis
    outputs: [site_boundary, terrain]
  - filename: massing.gh
    description: Building massing
    inputs: [site_boundary, terrain, max_height]
workflows:
  - name: site_to_massing
    steps:
      - file: massing.gh
        action: set_parameter
        parameter: max_height
        value: 30
      - file: massing.gh
        action: transfer_geometry
        source_file: site.gh
        source_parameter: terrain
        target_parameter: terrain
      - file: massing.gh
        action: bake
        parameter: massing
";

fn arguments(workflow: &str) -> Value {
    let document = WorkflowDocument::from_yaml_str(DOCUMENT).expect("document parses");
    json!({
        "workflow_document": serde_json::to_value(&document).expect("document serializes"),
        "workflow_name": workflow,
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn a_failing_step_aborts_the_workflow() {
    let bridge = TestBridge::start().await;

    let failure = bridge
        .fail(endpoints::RUN_WORKFLOW, arguments("site_to_massing"))
        .await;
    assert_eq!(failure.error_type, ErrorKind::IncompatibleGeometryType);
    let report = failure
        .details
        .as_ref()
        .and_then(|details| details.get("report"))
        .expect("report attached");
    assert_eq!(
        report.get("completed").and_then(Value::as_array).map(Vec::len),
        Some(1)
    );
    assert_eq!(report.pointer("/failure/step"), Some(&json!(2)));
    assert_eq!(report.get("skipped"), Some(&json!(1)));

    assert_eq!(
        bridge.host.value_by_name(MASSING_DOCUMENT, "eml_input_max_height"),
        Ok(ParamValue::Number(30.0))
    );
    assert!(bridge.host.objects().is_empty(), "bake never ran");

    bridge.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_workflows_are_rejected_before_any_step() {
    let bridge = TestBridge::start().await;

    let failure = bridge
        .fail(endpoints::RUN_WORKFLOW, arguments("facade_pass"))
        .await;
    assert_eq!(failure.error_type, ErrorKind::ValidationError);
    assert_eq!(bridge.host.recompute_count(MASSING_DOCUMENT), Ok(0));

    bridge.stop().await;
}
