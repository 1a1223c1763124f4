//! Command line agent front end for the bridge.
//!
//! Usage:
//!
//! ```text
//! bridge-agent [--verbose] tools [--side client|server]
//! bridge-agent status
//! bridge-agent info
//! bridge-agent call <TOOL> [ARGUMENTS_JSON]
//! bridge-agent run-workflow <DOCUMENT> <WORKFLOW>
//! ```
//!
//! Every command prints one JSON document to stdout. Tool calls exit with a
//! non-zero status when the tool reports a failure.

use clap::{Parser, Subcommand, ValueEnum};
use rhino_bridge::{
    agent::ToolInvoker,
    bridge::{
        client::{BridgeClient, BridgeClientError},
        protocol::BridgeResponse,
    },
    catalog::tool_registry,
    config::{BridgeSettings, VerbosityFlag},
    telemetry,
    tool_registry::domain::{ToolDescriptor, ToolSide},
    workflow::domain::WorkflowDocument,
};
use serde_json::{Value, json};
use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
    sync::Arc,
};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Command line interface.
#[derive(Debug, Parser)]
#[command(name = "bridge-agent", version, about = "Calls bridge tools from the command line")]
struct Cli {
    /// Keeps diagnostic fields in tool output; overrides `DEBUG_MODE`.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Lists registered tools with their input schemas.
    Tools {
        /// Restricts the listing to one side.
        #[arg(long, value_enum)]
        side: Option<Side>,
    },
    /// Shows the bridge server status.
    Status,
    /// Shows the bridge server endpoints.
    Info,
    /// Invokes one tool.
    Call {
        /// Tool name.
        tool: String,
        /// Arguments as a JSON object.
        #[arg(default_value = "{}")]
        arguments: String,
    },
    /// Runs a workflow from a YAML or JSON document.
    RunWorkflow {
        /// Workflow document path.
        document: PathBuf,
        /// Workflow name inside the document.
        workflow: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Side {
    Client,
    Server,
}

impl From<Side> for ToolSide {
    fn from(side: Side) -> Self {
        match side {
            Side::Client => Self::Client,
            Side::Server => Self::Server,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, BoxError> {
    let dotenv = dotenvy::dotenv();
    telemetry::init(telemetry::DEFAULT_FILTER);
    if let Err(error) = dotenv
        && !error.not_found()
    {
        return Err(error.into());
    }

    let cli = Cli::parse();
    let settings = BridgeSettings::from_env()?;
    let verbosity = VerbosityFlag::new(cli.verbose || settings.debug_mode());
    let client = BridgeClient::new(settings)?;
    let invoker = ToolInvoker::new(Arc::new(tool_registry()?), client, verbosity);

    let (output, succeeded) = match cli.command {
        Command::Tools { side } => {
            let registry = invoker.registry();
            let tools: Vec<Value> = side.map_or_else(
                || registry.describe(),
                |chosen| {
                    registry
                        .list_by_side(chosen.into())
                        .into_iter()
                        .map(ToolDescriptor::to_json)
                        .collect()
                },
            );
            (json!({"count": tools.len(), "tools": tools}), true)
        }
        Command::Status => server_query(invoker.transport().status().await),
        Command::Info => server_query(invoker.transport().info().await),
        Command::Call { tool, arguments } => {
            let parsed: Value = serde_json::from_str(&arguments)?;
            invoke(&invoker, &tool, parsed).await
        }
        Command::RunWorkflow { document, workflow } => {
            let loaded = WorkflowDocument::from_path(&document)?;
            let definition = loaded.workflow(&workflow)?;
            tracing::info!(workflow = %definition.name, steps = definition.steps.len(), "running workflow");
            let arguments = json!({
                "workflow_document": serde_json::to_value(&loaded)?,
                "workflow_name": workflow,
            });
            invoke(&invoker, "run_eml_workflow", arguments).await
        }
    };

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &output)?;
    writeln!(stdout)?;
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn invoke(invoker: &ToolInvoker<BridgeClient>, tool: &str, arguments: Value) -> (Value, bool) {
    let server_side = invoker
        .registry()
        .resolve(tool)
        .is_ok_and(|declaration| declaration.descriptor().side() == ToolSide::Server);
    if server_side && !invoker.transport().check_connection().await {
        tracing::warn!(tool, "bridge server unreachable; the call will fail");
    }
    let payload = invoker.invoke_payload(tool, arguments).await;
    let succeeded = payload.get("success").and_then(Value::as_bool) == Some(true);
    (payload, succeeded)
}

fn server_query(result: Result<Value, BridgeClientError>) -> (Value, bool) {
    match result {
        Ok(data) => (json!({"success": true, "data": data}), true),
        Err(error) => (BridgeResponse::Failure(error.into_failure()).into_json(), false),
    }
}
