//! Application-wide error types.
//!
//! Every failure is scoped to a single generation request; nothing here is
//! fatal to the process. The three pipeline stages surface distinctly so a
//! caller can tell a rejected invoice from a failed render from a failed
//! upload of a perfectly good PDF.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invoice input failed validation; the message lists every violation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// PDF composition failed; no artifact was produced.
    #[error("Render error: {0}")]
    Render(String),

    /// The artifact rendered fine but could not be stored.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Requested artifact does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Returns a stable machine-readable code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Render(_) => "RENDER_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
        }
    }

    /// True when the failure was caused by the caller's input rather than
    /// the system.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }
}
