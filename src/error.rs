//! Cross-context error classification.
//!
//! Each service error maps onto a small, stable taxonomy so that an outer
//! transport layer can choose a response without matching on every variant.

use std::fmt;

/// Broad category of a service failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input failed a shape check or a business rule.
    Validation,
    /// The referenced entity does not exist (or is soft-deleted).
    NotFound,
    /// The write collided with existing data or a concurrent update.
    Conflict,
    /// The caller is not allowed to perform the operation.
    Forbidden,
    /// The persistence layer failed.
    Persistence,
}

impl ErrorKind {
    /// Returns the stable machine-readable error code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "DUPLICATE_ERROR",
            Self::Forbidden => "AUTHORIZATION_ERROR",
            Self::Persistence => "DATABASE_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Classifies an error into an [`ErrorKind`].
pub trait Classify {
    /// Returns the category of this error.
    fn kind(&self) -> ErrorKind;
}
