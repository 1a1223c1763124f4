//! Error types for the EML correlator.

use super::EmlDirection;
use crate::{
    bridge::protocol::ErrorKind,
    host::domain::{DocumentName, HostError, ValueClass},
};
use thiserror::Error;

/// Errors raised while discovering, reading, writing, or transferring EML
/// parameters.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EmlError {
    /// No EML parameter with this name exists in the document.
    #[error("EML parameter '{name}' was not found in '{file}'")]
    ParameterNotFound {
        /// Document that was searched.
        file: DocumentName,
        /// Requested parameter name.
        name: String,
    },

    /// The name carries the `eml_` prefix but no valid direction.
    #[error("'{0}' does not follow the eml_input_<name> / eml_output_<name> convention")]
    NotEmlParameter(String),

    /// A bare logical name matched both an input and an output.
    #[error("logical name '{name}' is both an input and an output in '{file}'; use the full name")]
    AmbiguousParameter {
        /// Document that was searched.
        file: DocumentName,
        /// Requested logical name.
        name: String,
    },

    /// The parameter has the wrong direction for the operation.
    #[error("'{name}' is an {found} parameter, expected an {expected} parameter")]
    DirectionMismatch {
        /// Full parameter name.
        name: String,
        /// Direction the operation needs.
        expected: EmlDirection,
        /// Direction the parameter has.
        found: EmlDirection,
    },

    /// No conversion exists between the two value classes.
    #[error("cannot convert {from} to {to}")]
    IncompatibleType {
        /// Class of the source value.
        from: ValueClass,
        /// Declared class of the destination.
        to: ValueClass,
    },

    /// The destination constraints reject the value.
    #[error("invalid value for '{parameter}': {reason}")]
    Validation {
        /// Full parameter name.
        parameter: String,
        /// Rejection reason.
        reason: String,
    },

    /// The host reported a failure.
    #[error(transparent)]
    Host(#[from] HostError),
}

impl EmlError {
    /// Classifies the error for the wire protocol.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::IncompatibleType { .. } => ErrorKind::IncompatibleGeometryType,
            Self::ParameterNotFound { .. }
            | Self::NotEmlParameter(_)
            | Self::AmbiguousParameter { .. }
            | Self::DirectionMismatch { .. }
            | Self::Validation { .. } => ErrorKind::ValidationError,
            Self::Host(error) => error.kind(),
        }
    }
}

/// Result type for EML operations.
pub type EmlResult<T> = Result<T, EmlError>;
