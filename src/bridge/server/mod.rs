//! Host-side bridge server.
//!
//! - [`dispatch`]: path-to-handler table
//! - [`handler`]: handler contract and argument access
//! - [`isolation`]: failure isolation around each handler call
//! - [`executor`]: serialized access to the host session
//! - [`http`]: axum router and server lifecycle

pub mod dispatch;
pub mod executor;
pub mod fault;
pub mod handler;
pub mod http;
pub mod isolation;

pub use dispatch::{DispatchError, DispatchTable, EndpointModule, EndpointRegistration};
pub use executor::SerializedExecutor;
pub use fault::{HandlerFault, HandlerResult};
pub use handler::{Arguments, EndpointHandler, HandlerContext};
pub use http::{BridgeServer, RunningBridgeServer, ServerError, resolve_bind_address, router};
