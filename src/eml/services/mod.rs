//! Orchestration services for EML parameters.

mod correlator;

pub use correlator::{EmlCorrelator, TransferOutcome, TransferRequest, WriteOutcome};
