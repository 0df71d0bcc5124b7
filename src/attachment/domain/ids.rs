//! Identifier type for attachments.

use super::AttachmentDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Positive integer identifier of an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentId(i64);

impl AttachmentId {
    /// Creates a validated attachment identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentDomainError::InvalidAttachmentId`] when the value is not
    /// positive.
    pub const fn new(value: i64) -> Result<Self, AttachmentDomainError> {
        if value <= 0 {
            return Err(AttachmentDomainError::InvalidAttachmentId(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
