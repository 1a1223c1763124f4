//! Model objects and host status snapshots.

use super::{Geometry, HostObjectId};
use serde::{Deserialize, Serialize};

/// An object living in the host model, created by drawing or baking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostObject {
    /// Object identifier.
    pub id: HostObjectId,
    /// Layer the object lives on.
    pub layer: String,
    /// Object geometry.
    pub geometry: Geometry,
}

impl HostObject {
    /// Creates an object with a fresh identifier.
    #[must_use]
    pub fn new(layer: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            id: HostObjectId::new(),
            layer: layer.into(),
            geometry,
        }
    }
}

/// Availability of the host subsystems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostStatus {
    /// Host product name.
    pub name: String,
    /// Whether the geometry editor is reachable.
    pub modeler_available: bool,
    /// Whether the node-graph solver is reachable.
    pub solver_available: bool,
}
