//! Cross-file parameter correlation (the EML convention).
//!
//! Components named `eml_input_<name>` or `eml_output_<name>` are eligible
//! for discovery across every open document. Outputs are matched to inputs
//! of the same logical name in other documents and values are transferred
//! with explicit, loss-free conversions only.
//!
//! - Domain types in [`domain`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
