//! In-memory modeling host.
//!
//! This adapter models documents, components, and baked objects without a
//! real geometry kernel. It backs the development server and the test suite.

use crate::host::{
    domain::{
        ComponentId, ComponentInfo, ComponentKind, DocumentName, Geometry, GeometryClass,
        HostError, HostObject, HostObjectId, HostStatus, ParamValue, Point3,
    },
    ports::{HostResult, ModelHost},
};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

const DEFAULT_LAYER: &str = "Default";
const BAKE_LAYER: &str = "Baked";

/// A document definition added to the in-memory host library.
#[derive(Debug, Clone)]
pub struct InMemoryDocument {
    name: DocumentName,
    components: Vec<(ComponentInfo, ParamValue)>,
}

impl InMemoryDocument {
    /// Creates an empty document.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::EmptyDocumentName`] when `name` is blank.
    pub fn new(name: impl Into<String>) -> HostResult<Self> {
        Ok(Self {
            name: DocumentName::new(name)?,
            components: Vec::new(),
        })
    }

    /// Adds a component with an initial value.
    #[must_use]
    pub fn with_component(
        mut self,
        name: impl Into<String>,
        kind: ComponentKind,
        value: ParamValue,
    ) -> Self {
        self.components.push((ComponentInfo::new(name, kind), value));
        self
    }

    /// Returns the document name.
    #[must_use]
    pub const fn name(&self) -> &DocumentName {
        &self.name
    }
}

/// Thread-safe in-memory host. Clones share state.
#[derive(Debug, Clone)]
pub struct InMemoryHost {
    state: Arc<RwLock<InMemoryHostState>>,
}

#[derive(Debug)]
struct InMemoryHostState {
    documents: Vec<DocumentState>,
    open_order: Vec<DocumentName>,
    objects: Vec<HostObject>,
    selection: Vec<HostObjectId>,
    modeler_available: bool,
    solver_available: bool,
}

#[derive(Debug)]
struct DocumentState {
    name: DocumentName,
    components: Vec<(ComponentInfo, ParamValue)>,
    recompute_count: u64,
}

impl Default for InMemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHost {
    /// Creates a host with no documents and both subsystems available.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryHostState {
                documents: Vec::new(),
                open_order: Vec::new(),
                objects: Vec::new(),
                selection: Vec::new(),
                modeler_available: true,
                solver_available: true,
            })),
        }
    }

    /// Adds a document to the host library without opening it.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Runtime`] when a document with the same name
    /// already exists.
    pub fn add_document(&self, document: InMemoryDocument) -> HostResult<()> {
        let mut state = self.write_state();
        if state.find(&document.name).is_some() {
            return Err(HostError::Runtime(format!(
                "document '{}' already exists",
                document.name
            )));
        }
        state.documents.push(DocumentState {
            name: document.name,
            components: document.components,
            recompute_count: 0,
        });
        Ok(())
    }

    /// Adds a document and opens it.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::add_document`].
    pub fn add_open_document(&self, document: InMemoryDocument) -> HostResult<()> {
        let name = document.name.clone();
        self.add_document(document)?;
        self.write_state().open_order.push(name);
        Ok(())
    }

    /// Reads a component value by display name, ignoring open state.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::DocumentNotFound`] or a [`HostError::ValueRejected`]
    /// naming the missing component.
    pub fn value_by_name(&self, document: &str, component: &str) -> HostResult<ParamValue> {
        let state = self.read_state();
        let document_state = state
            .documents
            .iter()
            .find(|candidate| candidate.name.as_str() == document)
            .ok_or_else(|| HostError::DocumentNotFound(document.to_owned()))?;
        document_state
            .components
            .iter()
            .find(|(info, _)| info.name == component)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| HostError::ValueRejected {
                component: component.to_owned(),
                reason: "no such component".to_owned(),
            })
    }

    /// Returns how many times the document was recomputed.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::DocumentNotFound`] for unknown documents.
    pub fn recompute_count(&self, document: &str) -> HostResult<u64> {
        let state = self.read_state();
        state
            .documents
            .iter()
            .find(|candidate| candidate.name.as_str() == document)
            .map(|found| found.recompute_count)
            .ok_or_else(|| HostError::DocumentNotFound(document.to_owned()))
    }

    /// Returns every object in the model.
    #[must_use]
    pub fn objects(&self) -> Vec<HostObject> {
        self.read_state().objects.clone()
    }

    /// Marks an object as selected.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Runtime`] when no object has this identifier.
    pub fn select(&self, object: HostObjectId) -> HostResult<()> {
        let mut state = self.write_state();
        if !state.objects.iter().any(|candidate| candidate.id == object) {
            return Err(HostError::Runtime(format!("object {object} does not exist")));
        }
        if !state.selection.contains(&object) {
            state.selection.push(object);
        }
        Ok(())
    }

    /// Toggles availability of the node-graph solver.
    pub fn set_solver_available(&self, available: bool) {
        self.write_state().solver_available = available;
    }

    /// Toggles availability of the geometry editor.
    pub fn set_modeler_available(&self, available: bool) {
        self.write_state().modeler_available = available;
    }

    fn read_state(&self) -> RwLockReadGuard<'_, InMemoryHostState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, InMemoryHostState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl InMemoryHostState {
    fn find(&self, document: &DocumentName) -> Option<&DocumentState> {
        self.documents
            .iter()
            .find(|candidate| candidate.name == *document)
    }

    fn ensure_solver(&self) -> HostResult<()> {
        if self.solver_available {
            Ok(())
        } else {
            Err(HostError::Unavailable("node-graph solver".to_owned()))
        }
    }

    fn ensure_modeler(&self) -> HostResult<()> {
        if self.modeler_available {
            Ok(())
        } else {
            Err(HostError::Unavailable("geometry editor".to_owned()))
        }
    }

    fn open_document_state(&self, document: &DocumentName) -> HostResult<&DocumentState> {
        self.ensure_solver()?;
        let found = self
            .find(document)
            .ok_or_else(|| HostError::DocumentNotFound(document.to_string()))?;
        if !self.open_order.contains(document) {
            return Err(HostError::DocumentNotOpen(document.clone()));
        }
        Ok(found)
    }

    fn open_document_state_mut(
        &mut self,
        document: &DocumentName,
    ) -> HostResult<&mut DocumentState> {
        self.ensure_solver()?;
        if !self.open_order.contains(document) {
            return if self.find(document).is_some() {
                Err(HostError::DocumentNotOpen(document.clone()))
            } else {
                Err(HostError::DocumentNotFound(document.to_string()))
            };
        }
        self.documents
            .iter_mut()
            .find(|candidate| candidate.name == *document)
            .ok_or_else(|| HostError::DocumentNotFound(document.to_string()))
    }
}

impl DocumentState {
    fn component(&self, component: ComponentId) -> HostResult<&(ComponentInfo, ParamValue)> {
        self.components
            .iter()
            .find(|(info, _)| info.id == component)
            .ok_or_else(|| HostError::ComponentNotFound {
                document: self.name.clone(),
                component,
            })
    }
}

fn accepts(kind: &ComponentKind, value: &ParamValue) -> Result<(), String> {
    match (kind, value) {
        (ComponentKind::Slider { .. }, ParamValue::Number(_))
        | (ComponentKind::Panel | ComponentKind::Text, ParamValue::Text(_) | ParamValue::Empty)
        | (ComponentKind::Toggle, ParamValue::Boolean(_))
        | (ComponentKind::Number, ParamValue::Number(_) | ParamValue::Empty)
        | (ComponentKind::Integer, ParamValue::Integer(_) | ParamValue::Empty) => Ok(()),
        (ComponentKind::Slider { min, max, .. }, _) => {
            Err(format!("slider expects a number between {min} and {max}"))
        }
        (ComponentKind::ValueList { items }, ParamValue::Selection(selected)) => selected
            .iter()
            .find(|item| !items.contains(item))
            .map_or(Ok(()), |unknown| {
                Err(format!("'{unknown}' is not an item of the value list"))
            }),
        (ComponentKind::Geometry { class }, ParamValue::Geometry(items)) => items
            .iter()
            .find(|item| *class != GeometryClass::Geometry && item.class() != *class)
            .map_or(Ok(()), |item| {
                Err(format!("expected {class} geometry, got {}", item.class()))
            }),
        (ComponentKind::Geometry { .. }, ParamValue::Empty) => Ok(()),
        (other, _) => Err(format!(
            "{} component expects {} values",
            other.label(),
            other.value_class()
        )),
    }
}

impl ModelHost for InMemoryHost {
    fn status(&self) -> HostStatus {
        let state = self.read_state();
        HostStatus {
            name: "in-memory host".to_owned(),
            modeler_available: state.modeler_available,
            solver_available: state.solver_available,
        }
    }

    fn open_documents(&self) -> Vec<DocumentName> {
        let state = self.read_state();
        if state.solver_available {
            state.open_order.clone()
        } else {
            Vec::new()
        }
    }

    fn open_document(&mut self, document: &DocumentName) -> HostResult<()> {
        let mut state = self.write_state();
        state.ensure_solver()?;
        if state.find(document).is_none() {
            return Err(HostError::DocumentNotFound(document.to_string()));
        }
        if !state.open_order.contains(document) {
            state.open_order.push(document.clone());
        }
        Ok(())
    }

    fn components(&self, document: &DocumentName) -> HostResult<Vec<ComponentInfo>> {
        let state = self.read_state();
        let found = state.open_document_state(document)?;
        Ok(found
            .components
            .iter()
            .map(|(info, _)| info.clone())
            .collect())
    }

    fn read_value(
        &self,
        document: &DocumentName,
        component: ComponentId,
    ) -> HostResult<ParamValue> {
        let state = self.read_state();
        let found = state.open_document_state(document)?;
        found.component(component).map(|(_, value)| value.clone())
    }

    fn write_value(
        &mut self,
        document: &DocumentName,
        component: ComponentId,
        value: ParamValue,
    ) -> HostResult<()> {
        let mut state = self.write_state();
        let found = state.open_document_state_mut(document)?;
        let document_name = found.name.clone();
        let (info, slot) = found
            .components
            .iter_mut()
            .find(|(info, _)| info.id == component)
            .ok_or(HostError::ComponentNotFound {
                document: document_name,
                component,
            })?;
        accepts(&info.kind, &value).map_err(|reason| HostError::ValueRejected {
            component: info.name.clone(),
            reason,
        })?;
        *slot = value;
        Ok(())
    }

    fn recompute(&mut self, document: &DocumentName) -> HostResult<()> {
        let mut state = self.write_state();
        let found = state.open_document_state_mut(document)?;
        found.recompute_count = found.recompute_count.saturating_add(1);
        Ok(())
    }

    fn draw_line(&mut self, start: Point3, end: Point3) -> HostResult<HostObject> {
        let mut state = self.write_state();
        state.ensure_modeler()?;
        let object = HostObject::new(DEFAULT_LAYER, Geometry::Line { start, end });
        state.objects.push(object.clone());
        Ok(object)
    }

    fn selected_objects(&self) -> HostResult<Vec<HostObject>> {
        let state = self.read_state();
        state.ensure_modeler()?;
        Ok(state
            .selection
            .iter()
            .filter_map(|id| state.objects.iter().find(|object| object.id == *id))
            .cloned()
            .collect())
    }

    fn bake(
        &mut self,
        document: &DocumentName,
        component: ComponentId,
        layer: Option<&str>,
    ) -> HostResult<Vec<HostObject>> {
        let mut state = self.write_state();
        state.ensure_modeler()?;
        let found = state.open_document_state(document)?;
        let (info, value) = found.component(component)?;
        let ParamValue::Geometry(items) = value else {
            return Err(HostError::NothingToBake(info.name.clone()));
        };
        if items.is_empty() {
            return Err(HostError::NothingToBake(info.name.clone()));
        }
        let target_layer = layer.unwrap_or(BAKE_LAYER);
        let baked: Vec<HostObject> = items
            .iter()
            .map(|geometry| HostObject::new(target_layer, geometry.clone()))
            .collect();
        state.objects.extend(baked.iter().cloned());
        Ok(baked)
    }
}
