//! Render error types.

use std::path::PathBuf;
use thiserror::Error;

/// PDF composition errors.
///
/// A render failure never leaves a partial artifact behind; callers only
/// see a locator for invoices that rendered completely.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The underlying PDF engine rejected the document.
    #[error("pdf composition failed: {0}")]
    Pdf(String),

    /// Writing the finished document to disk failed.
    #[error("failed to write pdf to {path}: {source}")]
    Io {
        /// Target path of the write.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The HTTP client for logo fetching could not be constructed.
    #[error("logo fetcher initialization failed: {0}")]
    Client(String),
}

impl RenderError {
    /// Create a PDF engine error.
    #[must_use]
    pub fn pdf(msg: impl Into<String>) -> Self {
        Self::Pdf(msg.into())
    }

    /// Create an IO error for a target path.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
