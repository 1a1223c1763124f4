//! Errors raised by the modeling host and host session.

use super::{ComponentId, DocumentName};
use crate::bridge::protocol::ErrorKind;
use thiserror::Error;

/// Errors returned by host adapters and the host session.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    /// The document name is empty after trimming.
    #[error("document name must not be empty")]
    EmptyDocumentName,

    /// No document with this name is known to the host.
    #[error("document '{0}' was not found")]
    DocumentNotFound(String),

    /// The document exists but is not open.
    #[error("document '{0}' is not open")]
    DocumentNotOpen(DocumentName),

    /// No document was named and the session has no active document.
    #[error("no document was specified and no document is active")]
    NoActiveDocument,

    /// The component does not exist in the document.
    #[error("component {component} was not found in document '{document}'")]
    ComponentNotFound {
        /// Document that was searched.
        document: DocumentName,
        /// Missing component.
        component: ComponentId,
    },

    /// The host refused a value written to a component.
    #[error("component '{component}' rejected the value: {reason}")]
    ValueRejected {
        /// Component display name.
        component: String,
        /// Rejection reason.
        reason: String,
    },

    /// A bake request targeted a component without geometry.
    #[error("component '{0}' holds no geometry to bake")]
    NothingToBake(String),

    /// A host subsystem (modeler or solver) is not available.
    #[error("host subsystem unavailable: {0}")]
    Unavailable(String),

    /// Generic adapter failure.
    #[error("host runtime error: {0}")]
    Runtime(String),
}

impl HostError {
    /// Classifies the error for the wire protocol.
    ///
    /// Caller mistakes (unknown or closed documents, rejected values) are
    /// validation errors; host-side faults are handler errors.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Unavailable(_) | Self::Runtime(_) => ErrorKind::HandlerError,
            Self::EmptyDocumentName
            | Self::DocumentNotFound(_)
            | Self::DocumentNotOpen(_)
            | Self::NoActiveDocument
            | Self::ComponentNotFound { .. }
            | Self::ValueRejected { .. }
            | Self::NothingToBake(_) => ErrorKind::ValidationError,
        }
    }
}
