//! Validated user name types.

use super::UserDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique login name: 3-50 characters of `[A-Za-z0-9_]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 50;

    /// Creates a validated username.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::UsernameLength`] when the value is not 3-50
    /// characters, or [`UserDomainError::InvalidUsername`] when it contains
    /// anything other than ASCII letters, digits, and underscores.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let length = raw.chars().count();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            return Err(UserDomainError::UsernameLength(raw));
        }
        if !raw.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
            return Err(UserDomainError::InvalidUsername(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the username as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Human-readable name shown in place of the username.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    const MAX_LENGTH: usize = 100;

    /// Creates a validated display name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyDisplayName`] when the trimmed value is
    /// empty or [`UserDomainError::DisplayNameTooLong`] when it exceeds 100
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserDomainError::EmptyDisplayName);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(UserDomainError::DisplayNameTooLong);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the display name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
