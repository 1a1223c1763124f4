//! Tool catalog shared by the agent and the bridge server.
//!
//! Each module declares its tools twice: agent-side descriptors for the
//! [`crate::tool_registry`] and host-side handlers for the
//! [`crate::bridge::server::DispatchTable`]. Server-side descriptors and
//! endpoint registrations correspond one to one.
//!
//! - [`custom`]: local tools that need no host
//! - [`rhino`]: model drawing, selection, and baking
//! - [`grasshopper`]: documents, sliders, EML parameters, and workflows

pub mod custom;
pub mod endpoints;
pub mod grasshopper;
pub mod rhino;

pub use custom::CustomTools;
pub use grasshopper::{GrasshopperEndpoints, GrasshopperTools};
pub use rhino::{RhinoEndpoints, RhinoTools};

use crate::{
    bridge::server::{DispatchError, DispatchTable},
    tool_registry::{domain::ToolRegistryResult, services::ToolRegistry},
};
use mockable::Clock;
use std::sync::Arc;

/// Builds the agent-side registry of every catalog tool.
///
/// # Errors
///
/// Returns a registry error when two tools share a name or a descriptor is
/// invalid.
pub fn tool_registry() -> ToolRegistryResult<ToolRegistry> {
    ToolRegistry::discover(&[&CustomTools, &RhinoTools, &GrasshopperTools])
}

/// Builds the host-side dispatch table of every catalog endpoint.
///
/// # Errors
///
/// Returns [`DispatchError::DuplicatePath`] when two endpoints share a path.
pub fn dispatch_table<C>(clock: Arc<C>) -> Result<DispatchTable, DispatchError>
where
    C: Clock + Send + Sync + 'static,
{
    DispatchTable::from_modules(&[&RhinoEndpoints, &GrasshopperEndpoints::new(clock)])
}

#[cfg(test)]
mod tests;
