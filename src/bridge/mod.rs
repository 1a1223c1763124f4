//! HTTP bridge between the agent process and the modeling host.
//!
//! - [`protocol`]: wire types shared by both sides
//! - [`client`]: agent-side HTTP client
//! - [`server`]: host-side dispatch table, isolation, and HTTP server

pub mod client;
pub mod protocol;
pub mod server;

#[cfg(test)]
mod tests;
