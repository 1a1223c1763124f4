//! Discovery, suggestion, and transfer over EML parameters.

use crate::eml::domain::{
    Compatibility, EmlCatalog, EmlDirection, EmlError, EmlName, EmlParameter, EmlResult,
    ParameterRef, Suggestion, compatibility, convert, prepare_write,
};
use crate::host::{
    domain::{DocumentName, ParamValue},
    session::HostSession,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashSet;

/// Request to copy an output value into an input parameter.
///
/// Omitted files resolve to the active document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransferRequest {
    /// Document owning the output.
    #[serde(default)]
    pub source_file: Option<String>,
    /// Output parameter, by full or logical name.
    pub source_parameter: String,
    /// Document owning the input.
    #[serde(default)]
    pub target_file: Option<String>,
    /// Input parameter, by full or logical name.
    pub target_parameter: String,
}

impl TransferRequest {
    /// Creates a request between two explicit documents.
    #[must_use]
    pub fn new(
        source_file: impl Into<String>,
        source_parameter: impl Into<String>,
        target_file: impl Into<String>,
        target_parameter: impl Into<String>,
    ) -> Self {
        Self {
            source_file: Some(source_file.into()),
            source_parameter: source_parameter.into(),
            target_file: Some(target_file.into()),
            target_parameter: target_parameter.into(),
        }
    }
}

/// Outcome of a single-parameter write.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteOutcome {
    /// Written parameter.
    pub parameter: ParameterRef,
    /// Value before the write.
    pub previous: ParamValue,
    /// Value written.
    pub value: ParamValue,
    /// Whether a slider value was clamped.
    pub clamped: bool,
}

impl WriteOutcome {
    /// Renders the outcome for wire payloads.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "file": self.parameter.file.as_str(),
            "parameter": self.parameter.name,
            "previous_value": self.previous.to_json(),
            "new_value": self.value.to_json(),
            "clamped": self.clamped,
        })
    }
}

/// Outcome of a transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferOutcome {
    /// Output that was read.
    pub source: ParameterRef,
    /// Input that was written.
    pub target: ParameterRef,
    /// How the value was carried over.
    pub compatibility: Compatibility,
    /// Value written to the input.
    pub value: ParamValue,
    /// Whether a slider value was clamped.
    pub clamped: bool,
}

impl TransferOutcome {
    /// Renders the outcome for wire payloads.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "source": self.source,
            "target": self.target,
            "compatibility": self.compatibility,
            "value": self.value.to_json(),
            "clamped": self.clamped,
        })
    }
}

#[derive(Debug, Default)]
struct DocumentScan {
    parameters: Vec<EmlParameter>,
    duplicates: Vec<ParameterRef>,
    unclassified: Vec<ParameterRef>,
}

/// Correlates EML parameters across the documents open in a host session.
///
/// Every call re-scans the host; nothing is cached between calls.
#[derive(Debug)]
pub struct EmlCorrelator<'session> {
    session: &'session mut HostSession,
}

impl<'session> EmlCorrelator<'session> {
    /// Creates a correlator over a host session.
    pub const fn new(session: &'session mut HostSession) -> Self {
        Self { session }
    }

    /// Scans every open document and groups parameters by logical name.
    ///
    /// # Errors
    ///
    /// Propagates host failures.
    pub fn discover(&self) -> EmlResult<EmlCatalog> {
        let mut catalog = EmlCatalog::default();
        for file in self.session.host().open_documents() {
            let scan = self.scan(&file)?;
            for parameter in scan.parameters {
                let group = catalog
                    .groups
                    .entry(parameter.logical_name.clone())
                    .or_default();
                match parameter.direction {
                    EmlDirection::Input => group.inputs.push(parameter),
                    EmlDirection::Output => group.outputs.push(parameter),
                }
            }
            catalog.duplicates.extend(scan.duplicates);
            catalog.unclassified.extend(scan.unclassified);
        }
        tracing::debug!(
            parameters = catalog.len(),
            duplicates = catalog.duplicates.len(),
            "EML discovery complete"
        );
        Ok(catalog)
    }

    /// Proposes output-to-input connections across documents.
    ///
    /// Exact matches rank before convertible ones; incompatible pairs are
    /// left out.
    ///
    /// # Errors
    ///
    /// Propagates host failures.
    pub fn suggest(&self) -> EmlResult<Vec<Suggestion>> {
        let catalog = self.discover()?;
        let mut suggestions: Vec<Suggestion> = catalog
            .groups
            .iter()
            .flat_map(|(logical, group)| {
                group.outputs.iter().flat_map(move |output| {
                    group
                        .inputs
                        .iter()
                        .filter(move |input| input.file != output.file)
                        .filter_map(move |input| {
                            let fit = compatibility(output.declared_type(), input.declared_type())?;
                            Some(Suggestion {
                                logical_name: logical.clone(),
                                source: output.reference(),
                                target: input.reference(),
                                source_type: output.declared_type().to_string(),
                                target_type: input.declared_type().to_string(),
                                compatibility: fit,
                            })
                        })
                })
            })
            .collect();
        suggestions.sort_by(|left, right| {
            (left.compatibility, &left.logical_name, &left.source, &left.target).cmp(&(
                right.compatibility,
                &right.logical_name,
                &right.source,
                &right.target,
            ))
        });
        Ok(suggestions)
    }

    /// Finds one parameter by full name (`eml_input_height`) or by logical
    /// name (`height`).
    ///
    /// # Errors
    ///
    /// Returns [`EmlError::ParameterNotFound`] when nothing matches,
    /// [`EmlError::AmbiguousParameter`] when a logical name matches both
    /// directions, [`EmlError::NotEmlParameter`] for malformed `eml_` names,
    /// and host errors when the document cannot be resolved.
    pub fn find(&self, file: Option<&str>, name: &str) -> EmlResult<EmlParameter> {
        let document = self.session.resolve_document(file)?;
        let scan = self.scan(&document)?;
        let not_found = |document: DocumentName| EmlError::ParameterNotFound {
            file: document,
            name: name.to_owned(),
        };
        if let Some(parsed) = EmlName::parse(name) {
            return scan
                .parameters
                .into_iter()
                .find(|parameter| {
                    parameter.direction == parsed.direction()
                        && parameter.logical_name == parsed.logical_name()
                })
                .ok_or_else(|| not_found(document));
        }
        if EmlName::has_prefix(name) {
            return Err(EmlError::NotEmlParameter(name.to_owned()));
        }
        let logical = name.trim().to_ascii_lowercase();
        let mut matches = scan
            .parameters
            .into_iter()
            .filter(|parameter| parameter.logical_name == logical);
        match (matches.next(), matches.next()) {
            (Some(found), None) => Ok(found),
            (Some(_), Some(_)) => Err(EmlError::AmbiguousParameter {
                file: document,
                name: name.to_owned(),
            }),
            (None, _) => Err(not_found(document)),
        }
    }

    /// Writes a JSON value to a parameter and recomputes its document.
    ///
    /// The JSON is interpreted according to the declared type of the
    /// parameter.
    ///
    /// # Errors
    ///
    /// Returns [`EmlError::Validation`] when the value does not fit, plus
    /// the lookup errors of [`Self::find`].
    pub fn write(&mut self, file: Option<&str>, name: &str, raw: &Value) -> EmlResult<WriteOutcome> {
        let parameter = self.find(file, name)?;
        let value = ParamValue::from_json(raw, parameter.declared_type()).map_err(|reason| {
            EmlError::Validation {
                parameter: parameter.name.clone(),
                reason,
            }
        })?;
        self.write_parameter(&parameter, value)
    }

    /// Copies an output value into an input, converting when needed.
    ///
    /// Nothing is written unless conversion and destination validation
    /// both succeed.
    ///
    /// # Errors
    ///
    /// Returns [`EmlError::DirectionMismatch`] when the source is not an
    /// output or the target is not an input, [`EmlError::IncompatibleType`]
    /// when no conversion exists, and [`EmlError::Validation`] when the
    /// destination rejects the converted value.
    pub fn transfer(&mut self, request: &TransferRequest) -> EmlResult<TransferOutcome> {
        let source = self.find(request.source_file.as_deref(), &request.source_parameter)?;
        expect_direction(&source, EmlDirection::Output)?;
        let target = self.find(request.target_file.as_deref(), &request.target_parameter)?;
        expect_direction(&target, EmlDirection::Input)?;

        let converted = convert(&target.name, &source.value, target.declared_type())
            .inspect_err(|error| {
                tracing::warn!(
                    source = %source.name,
                    target = %target.name,
                    error = %error,
                    "EML transfer rejected"
                );
            })?;
        let fit = source
            .value
            .class()
            .and_then(|class| compatibility(class, target.declared_type()))
            .unwrap_or(Compatibility::Convertible);
        let written = self.write_parameter(&target, converted)?;
        tracing::info!(
            source_file = %source.file,
            source = %source.name,
            target_file = %target.file,
            target = %target.name,
            "EML transfer complete"
        );
        Ok(TransferOutcome {
            source: source.reference(),
            target: written.parameter,
            compatibility: fit,
            value: written.value,
            clamped: written.clamped,
        })
    }

    fn write_parameter(
        &mut self,
        parameter: &EmlParameter,
        value: ParamValue,
    ) -> EmlResult<WriteOutcome> {
        let prepared = prepare_write(&parameter.name, &parameter.component_kind, value)?;
        let host = self.session.host_mut();
        host.write_value(&parameter.file, parameter.component, prepared.value.clone())?;
        host.recompute(&parameter.file)?;
        Ok(WriteOutcome {
            parameter: parameter.reference(),
            previous: parameter.value.clone(),
            value: prepared.value,
            clamped: prepared.clamped,
        })
    }

    fn scan(&self, file: &DocumentName) -> EmlResult<DocumentScan> {
        let host = self.session.host();
        let mut scan = DocumentScan::default();
        let mut claimed = HashSet::new();
        for component in host.components(file)? {
            let Some(parsed) = EmlName::parse(&component.name) else {
                if EmlName::has_prefix(&component.name) {
                    scan.unclassified.push(ParameterRef {
                        file: file.clone(),
                        name: component.name,
                    });
                }
                continue;
            };
            if !claimed.insert((parsed.direction(), parsed.logical_name().to_owned())) {
                tracing::warn!(
                    file = %file,
                    component = %component.name,
                    "duplicate EML parameter ignored; the first match wins"
                );
                scan.duplicates.push(ParameterRef {
                    file: file.clone(),
                    name: component.name,
                });
                continue;
            }
            let value = host.read_value(file, component.id)?;
            scan.parameters.push(EmlParameter {
                file: file.clone(),
                component: component.id,
                name: component.name,
                logical_name: parsed.logical_name().to_owned(),
                direction: parsed.direction(),
                component_kind: component.kind,
                value,
            });
        }
        Ok(scan)
    }
}

fn expect_direction(parameter: &EmlParameter, expected: EmlDirection) -> EmlResult<()> {
    if parameter.direction == expected {
        Ok(())
    } else {
        Err(EmlError::DirectionMismatch {
            name: parameter.name.clone(),
            expected,
            found: parameter.direction,
        })
    }
}
