//! Invoice validation error types.

use thiserror::Error;

/// One violated field in an invoice request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted path of the offending field, e.g. `items[2].quantity`.
    pub field: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl Violation {
    /// Create a violation for a field.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Invoice calculation and validation errors.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// The request violated one or more validation rules. Every violation
    /// is reported, not just the first.
    #[error("invoice validation failed: {}", format_violations(.0))]
    Invalid(Vec<Violation>),
}

impl InvoiceError {
    /// All violations carried by this error.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Invalid(violations) => violations,
        }
    }

    /// True when a violation names the given field.
    #[must_use]
    pub fn names_field(&self, field: &str) -> bool {
        self.violations().iter().any(|v| v.field == field)
    }
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
