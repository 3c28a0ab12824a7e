//! End-to-end invoice generation.
//!
//! Orchestrates the pipeline: validate the raw request, render the PDF,
//! store the artifact, and hand back a receipt with an opaque locator.
//! Stage failures stay distinct; a storage outage is never reported as a
//! bad invoice.

mod error;
mod service;
mod types;

pub use error::GenerationError;
pub use service::GenerationService;
pub use types::GenerationReceipt;
