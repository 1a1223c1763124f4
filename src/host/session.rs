//! Host session: the host handle plus the active-document pointer.

use super::{
    domain::{DocumentName, HostError},
    ports::{HostResult, ModelHost},
};

/// Owns the modeling host and tracks which document is active.
///
/// The bridge server keeps exactly one session and hands it to one handler
/// at a time.
pub struct HostSession {
    host: Box<dyn ModelHost>,
    active_document: Option<DocumentName>,
}

impl HostSession {
    /// Wraps a host. The first open document, if any, becomes active.
    #[must_use]
    pub fn new(host: Box<dyn ModelHost>) -> Self {
        let active_document = host.open_documents().into_iter().next();
        Self {
            host,
            active_document,
        }
    }

    /// Returns the host for read-only operations.
    #[must_use]
    pub fn host(&self) -> &dyn ModelHost {
        self.host.as_ref()
    }

    /// Returns the host for mutating operations.
    pub fn host_mut(&mut self) -> &mut dyn ModelHost {
        self.host.as_mut()
    }

    /// Returns the active document, if one was set.
    #[must_use]
    pub const fn active_document(&self) -> Option<&DocumentName> {
        self.active_document.as_ref()
    }

    /// Opens `document` if necessary and makes it active.
    ///
    /// # Errors
    ///
    /// Propagates host failures from opening the document.
    pub fn activate(&mut self, document: &DocumentName) -> HostResult<()> {
        self.host.open_document(document)?;
        self.active_document = Some(document.clone());
        Ok(())
    }

    /// Resolves an optional document argument to an open document.
    ///
    /// A named document must be open. Without a name the active document is
    /// used.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::NoActiveDocument`] when nothing is named or
    /// active, and [`HostError::DocumentNotOpen`] when the named document is
    /// not open.
    pub fn resolve_document(&self, requested: Option<&str>) -> HostResult<DocumentName> {
        let document = match requested {
            Some(name) => DocumentName::new(name)?,
            None => self
                .active_document
                .clone()
                .ok_or(HostError::NoActiveDocument)?,
        };
        if self.host.open_documents().contains(&document) {
            Ok(document)
        } else {
            Err(HostError::DocumentNotOpen(document))
        }
    }
}

impl std::fmt::Debug for HostSession {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("HostSession")
            .field("active_document", &self.active_document)
            .finish_non_exhaustive()
    }
}
