//! Rhino bridge: lets an agent drive a Rhino/Grasshopper modeling host over
//! a local HTTP bridge.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: values, names, and errors with no infrastructure
//! - **Ports**: trait seams towards the modeling host and tool modules
//! - **Adapters**: the in-memory host used by the server binary and tests
//! - **Services**: the correlator, workflow executor, and registry
//!
//! # Modules
//!
//! - [`agent`]: tool invocation on behalf of an agent
//! - [`bridge`]: wire protocol, HTTP client, and bridge server
//! - [`catalog`]: the shipped tools and their server handlers
//! - [`config`]: settings resolved from the environment
//! - [`debug_filter`]: response shaping by verbosity
//! - [`eml`]: EML parameter naming, compatibility, and correlation
//! - [`host`]: the modeling host port and its adapters
//! - [`telemetry`]: tracing subscriber setup
//! - [`tool_registry`]: tool descriptors and discovery
//! - [`workflow`]: declarative multi-document workflows

pub mod agent;
pub mod bridge;
pub mod catalog;
pub mod config;
pub mod debug_filter;
pub mod eml;
pub mod host;
pub mod telemetry;
pub mod tool_registry;
pub mod workflow;
