//! Modeling host abstraction.
//!
//! The host is the geometry editor plus its node-graph solver. Everything the
//! bridge needs from it goes through the [`ports::ModelHost`] port; the
//! [`session::HostSession`] adds the notion of an active document.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod session;

#[cfg(test)]
mod tests;
