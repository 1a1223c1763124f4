//! Domain model for tool descriptors.
//!
//! A descriptor names a tool, documents its parameters, and says on which
//! side of the bridge the tool runs. Descriptors are plain values with no
//! knowledge of transport.

mod error;
mod name;
mod tool;

pub use error::{ToolRegistryError, ToolRegistryResult};
pub use name::ToolName;
pub use tool::{ParameterKind, ParameterSpec, ToolDescriptor, ToolSide};
