//! Domain model for the modeling host.
//!
//! Documents, components, values, and geometry are plain data. The host
//! itself stays behind the [`crate::host::ports::ModelHost`] port.

mod component;
mod error;
mod geometry;
mod ids;
mod object;
mod value;

pub use component::{ComponentInfo, ComponentKind};
pub use error::HostError;
pub use geometry::{Geometry, GeometryClass, Point3};
pub use ids::{ComponentId, DocumentName, HostObjectId};
pub use object::{HostObject, HostStatus};
pub use value::{ParamValue, ValueClass};
