//! Error types for user domain validation.

use thiserror::Error;

/// Errors returned while constructing user domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The user identifier is not a positive integer.
    #[error("invalid user id {0}, expected a positive integer")]
    InvalidUserId(i64),

    /// The username is not 3-50 characters long.
    #[error("username must be between 3 and 50 characters: '{0}'")]
    UsernameLength(String),

    /// The username contains characters outside `[A-Za-z0-9_]`.
    #[error("username '{0}' must contain only letters, numbers, and underscores")]
    InvalidUsername(String),

    /// The display name is empty after trimming.
    #[error("display name must not be empty")]
    EmptyDisplayName,

    /// The display name exceeds 100 characters.
    #[error("display name exceeds 100 character limit")]
    DisplayNameTooLong,

    /// The email address is malformed.
    #[error("invalid email address: '{0}'")]
    InvalidEmail(String),

    /// The avatar URL is not an absolute HTTP(S) URL.
    #[error("invalid avatar url: '{0}'")]
    InvalidAvatarUrl(String),
}

impl UserDomainError {
    /// Returns the request field the error refers to.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidUserId(_) => Some("id"),
            Self::UsernameLength(_) | Self::InvalidUsername(_) => Some("username"),
            Self::EmptyDisplayName | Self::DisplayNameTooLong => Some("displayName"),
            Self::InvalidEmail(_) => Some("email"),
            Self::InvalidAvatarUrl(_) => Some("avatarUrl"),
        }
    }
}
