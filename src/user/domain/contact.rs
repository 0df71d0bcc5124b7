//! Contact details attached to a user account.

use super::UserDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Email address in `local@domain.tld` form.
///
/// Only the coarse shape is checked: exactly one `@`, non-empty local part,
/// a dot inside the domain with text on both sides, and no whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InvalidEmail`] when the value does not have
    /// the expected shape.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        if is_plausible_email(&raw) {
            Ok(Self(raw))
        } else {
            Err(UserDomainError::InvalidEmail(raw))
        }
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_plausible_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .rsplit_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// Absolute `http` or `https` URL of a user's avatar image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvatarUrl(String);

impl AvatarUrl {
    /// Creates a validated avatar URL.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InvalidAvatarUrl`] when the value is not an
    /// absolute HTTP(S) URL with a host.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let host = raw
            .strip_prefix("https://")
            .or_else(|| raw.strip_prefix("http://"));
        let is_valid = host.is_some_and(|rest| {
            !rest.is_empty() && !rest.starts_with('/') && !rest.chars().any(char::is_whitespace)
        });
        if is_valid {
            Ok(Self(raw))
        } else {
            Err(UserDomainError::InvalidAvatarUrl(raw))
        }
    }

    /// Returns the URL as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
