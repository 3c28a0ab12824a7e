//! Generation pipeline error types.

use thiserror::Error;

use remit_shared::AppError;

use crate::invoice::InvoiceError;
use crate::render::RenderError;
use crate::storage::StorageError;

/// Errors from the generation pipeline.
///
/// Each variant maps to the pipeline stage that failed, so callers can
/// tell a rejected request from a broken render from a storage outage.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The request was rejected by invoice validation.
    #[error(transparent)]
    Validation(#[from] InvoiceError),

    /// PDF composition failed; no artifact exists for this invoice.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The PDF rendered but could not be stored or resolved.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Validation(e) => Self::Validation(e.to_string()),
            GenerationError::Render(e) => Self::Render(e.to_string()),
            GenerationError::Storage(StorageError::NotFound { key }) => Self::NotFound(key),
            GenerationError::Storage(e) => Self::Storage(e.to_string()),
        }
    }
}
