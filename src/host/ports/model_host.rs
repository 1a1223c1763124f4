//! Host capability port used by bridge handlers.

use crate::host::domain::{
    ComponentId, ComponentInfo, DocumentName, HostError, HostObject, HostStatus, ParamValue,
    Point3,
};

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;

/// Opaque capabilities of the modeling host.
///
/// Implementations are not required to be reentrant. The bridge server calls
/// them from one handler at a time.
pub trait ModelHost: Send {
    /// Reports availability of the host subsystems.
    fn status(&self) -> HostStatus;

    /// Lists documents currently open in the solver, in opening order.
    fn open_documents(&self) -> Vec<DocumentName>;

    /// Opens a known document, or leaves it open if it already is.
    fn open_document(&mut self, document: &DocumentName) -> HostResult<()>;

    /// Enumerates components of an open document in canvas order.
    fn components(&self, document: &DocumentName) -> HostResult<Vec<ComponentInfo>>;

    /// Reads the current value of a component.
    fn read_value(&self, document: &DocumentName, component: ComponentId)
    -> HostResult<ParamValue>;

    /// Writes a value to a component without recomputing.
    fn write_value(
        &mut self,
        document: &DocumentName,
        component: ComponentId,
        value: ParamValue,
    ) -> HostResult<()>;

    /// Triggers a solver recompute of the document.
    fn recompute(&mut self, document: &DocumentName) -> HostResult<()>;

    /// Draws a line into the model.
    fn draw_line(&mut self, start: Point3, end: Point3) -> HostResult<HostObject>;

    /// Returns the objects currently selected in the model.
    fn selected_objects(&self) -> HostResult<Vec<HostObject>>;

    /// Bakes the geometry held by a component into the model.
    fn bake(
        &mut self,
        document: &DocumentName,
        component: ComponentId,
        layer: Option<&str>,
    ) -> HostResult<Vec<HostObject>>;
}
