//! Identifier type for comments.

use super::CommentDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Positive integer identifier of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(i64);

impl CommentId {
    /// Creates a validated comment identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CommentDomainError::InvalidCommentId`] when the value is not
    /// positive.
    pub const fn new(value: i64) -> Result<Self, CommentDomainError> {
        if value <= 0 {
            return Err(CommentDomainError::InvalidCommentId(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
