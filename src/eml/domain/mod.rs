//! Domain model for the EML parameter convention.

mod compatibility;
mod constraint;
mod error;
mod name;
mod parameter;

pub use compatibility::{Compatibility, compatibility, convert};
pub use constraint::{PreparedWrite, prepare_write};
pub use error::{EmlError, EmlResult};
pub use name::{EmlDirection, EmlName};
pub use parameter::{EmlCatalog, EmlParameter, LogicalGroup, ParameterRef, Suggestion};
