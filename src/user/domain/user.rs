//! User aggregate root.

use super::{AvatarUrl, DisplayName, EmailAddress, UserId, Username};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated data for a user that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    username: Username,
    display_name: DisplayName,
    email: EmailAddress,
    avatar_url: Option<AvatarUrl>,
    created_at: DateTime<Utc>,
}

impl UserDraft {
    /// Creates a draft stamped with the current clock time.
    #[must_use]
    pub fn new(
        username: Username,
        display_name: DisplayName,
        email: EmailAddress,
        clock: &impl Clock,
    ) -> Self {
        Self {
            username,
            display_name,
            email,
            avatar_url: None,
            created_at: clock.utc(),
        }
    }

    /// Sets the avatar URL.
    #[must_use]
    pub fn with_avatar_url(mut self, avatar_url: AvatarUrl) -> Self {
        self.avatar_url = Some(avatar_url);
        self
    }

    /// Returns the requested username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the requested email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }
}

/// Partial update of a user profile; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    /// Replacement display name.
    pub display_name: Option<DisplayName>,
    /// Replacement email address.
    pub email: Option<EmailAddress>,
    /// Replacement avatar URL.
    pub avatar_url: Option<AvatarUrl>,
}

/// User aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: Username,
    display_name: DisplayName,
    email: EmailAddress,
    avatar_url: Option<AvatarUrl>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted identifier.
    pub id: UserId,
    /// Persisted username.
    pub username: Username,
    /// Persisted display name.
    pub display_name: DisplayName,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted avatar URL, if any.
    pub avatar_url: Option<AvatarUrl>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Materialises a draft under the identifier assigned by storage.
    #[must_use]
    pub fn from_draft(id: UserId, draft: UserDraft) -> Self {
        Self {
            id,
            username: draft.username,
            display_name: draft.display_name,
            email: draft.email,
            avatar_url: draft.avatar_url,
            created_at: draft.created_at,
            updated_at: draft.created_at,
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            username: data.username,
            display_name: data.display_name,
            email: data.email,
            avatar_url: data.avatar_url,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the unique username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the display name.
    #[must_use]
    pub const fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Returns the unique email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the avatar URL, if any.
    #[must_use]
    pub const fn avatar_url(&self) -> Option<&AvatarUrl> {
        self.avatar_url.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial profile update.
    pub fn apply_changes(&mut self, changes: UserChanges, clock: &impl Clock) {
        let UserChanges {
            display_name,
            email,
            avatar_url,
        } = changes;
        if let Some(name) = display_name {
            self.display_name = name;
        }
        if let Some(address) = email {
            self.email = address;
        }
        if avatar_url.is_some() {
            self.avatar_url = avatar_url;
        }
        self.updated_at = clock.utc();
    }
}
