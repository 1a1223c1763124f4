//! Workflow document format.

use super::{WorkflowError, WorkflowResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::HashSet, path::Path};

/// A set of documents and the workflows that connect them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDocument {
    /// Documents the workflows may touch. Empty means unrestricted.
    #[serde(default)]
    pub files: Vec<FileDeclaration>,
    /// Named workflows.
    pub workflows: Vec<WorkflowDefinition>,
}

/// Declared document with its EML interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDeclaration {
    /// Document name as the host knows it.
    pub filename: String,
    /// What the document produces.
    #[serde(default)]
    pub description: String,
    /// Logical names of EML inputs.
    #[serde(default)]
    pub inputs: Vec<String>,
    /// Logical names of EML outputs.
    #[serde(default)]
    pub outputs: Vec<String>,
}

/// Named, ordered sequence of steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    /// Unique workflow name.
    pub name: String,
    /// Optional summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Steps in execution order.
    pub steps: Vec<WorkflowStep>,
}

/// One step: a target document plus an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStep {
    /// Document the action applies to.
    pub file: String,
    /// Action and its arguments.
    #[serde(flatten)]
    pub action: StepAction,
}

/// Workflow step actions, tagged by `action`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StepAction {
    /// Open the document and make it active.
    Open,
    /// Write an EML parameter of the document.
    SetParameter {
        /// Parameter name, full or logical.
        parameter: String,
        /// Value to write.
        value: Value,
    },
    /// Copy an EML output from another document into an input of this one.
    TransferGeometry {
        /// Source document.
        source_file: String,
        /// Source output parameter.
        source_parameter: String,
        /// Target input parameter in the step's document.
        target_parameter: String,
    },
    /// Bake a parameter's geometry into the model.
    Bake {
        /// Parameter holding geometry.
        parameter: String,
        /// Target layer.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        layer: Option<String>,
    },
}

impl StepAction {
    /// Returns the action tag.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::SetParameter { .. } => "set_parameter",
            Self::TransferGeometry { .. } => "transfer_geometry",
            Self::Bake { .. } => "bake",
        }
    }
}

impl WorkflowStep {
    fn referenced_files(&self) -> impl Iterator<Item = &str> {
        let source = match &self.action {
            StepAction::TransferGeometry { source_file, .. } => Some(source_file.as_str()),
            _ => None,
        };
        std::iter::once(self.file.as_str()).chain(source)
    }
}

impl WorkflowDocument {
    /// Parses and validates a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Parse`] for malformed input and validation
    /// errors from [`Self::validate`].
    pub fn from_yaml_str(source: &str) -> WorkflowResult<Self> {
        let document: Self = serde_yaml::from_str(source).map_err(|error| WorkflowError::Parse {
            format: "YAML",
            message: error.to_string(),
        })?;
        document.validate()?;
        Ok(document)
    }

    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Parse`] for malformed input and validation
    /// errors from [`Self::validate`].
    pub fn from_json_str(source: &str) -> WorkflowResult<Self> {
        let document: Self = serde_json::from_str(source).map_err(|error| WorkflowError::Parse {
            format: "JSON",
            message: error.to_string(),
        })?;
        document.validate()?;
        Ok(document)
    }

    /// Parses a JSON value, as received in a request payload.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Parse`] for malformed input and validation
    /// errors from [`Self::validate`].
    pub fn from_value(value: Value) -> WorkflowResult<Self> {
        let document: Self = serde_json::from_value(value).map_err(|error| WorkflowError::Parse {
            format: "JSON",
            message: error.to_string(),
        })?;
        document.validate()?;
        Ok(document)
    }

    /// Loads a document from disk. Files ending in `.json` are parsed as
    /// JSON, everything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Io`] when the file cannot be read, plus the
    /// parse and validation errors of the matching parser.
    pub fn from_path(path: &Path) -> WorkflowResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|error| WorkflowError::Io {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
        let is_json = path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&source)
        } else {
            Self::from_yaml_str(&source)
        }
    }

    /// Checks workflow names are unique, workflows are non-empty, and steps
    /// only reference declared files when `files` is non-empty.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> WorkflowResult<()> {
        let declared: HashSet<&str> = self
            .files
            .iter()
            .map(|file| file.filename.as_str())
            .collect();
        let mut names = HashSet::new();
        for workflow in &self.workflows {
            if !names.insert(workflow.name.as_str()) {
                return Err(WorkflowError::DuplicateWorkflow(workflow.name.clone()));
            }
            if workflow.steps.is_empty() {
                return Err(WorkflowError::EmptyWorkflow(workflow.name.clone()));
            }
            if declared.is_empty() {
                continue;
            }
            for (position, step) in workflow.steps.iter().enumerate() {
                if let Some(file) = step.referenced_files().find(|file| !declared.contains(file)) {
                    return Err(WorkflowError::UndeclaredFile {
                        workflow: workflow.name.clone(),
                        step: position.saturating_add(1),
                        file: file.to_owned(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Selects a workflow by name.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::WorkflowNotFound`] listing the declared
    /// names.
    pub fn workflow(&self, name: &str) -> WorkflowResult<&WorkflowDefinition> {
        self.workflows
            .iter()
            .find(|workflow| workflow.name == name)
            .ok_or_else(|| WorkflowError::WorkflowNotFound {
                name: name.to_owned(),
                available: self
                    .workflows
                    .iter()
                    .map(|workflow| workflow.name.clone())
                    .collect(),
            })
    }
}
