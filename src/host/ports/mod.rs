//! Port contracts for the modeling host.

mod model_host;

pub use model_host::{HostResult, ModelHost};
