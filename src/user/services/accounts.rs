//! Service layer for user account management.

use crate::error::{Classify, ErrorKind};
use crate::paging::{Page, PageRequest};
use crate::user::{
    domain::{
        AvatarUrl, DisplayName, EmailAddress, User, UserChanges, UserDomainError, UserDraft,
        UserId, Username,
    },
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for creating a user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    username: String,
    display_name: String,
    email: String,
    avatar_url: Option<String>,
}

impl CreateUserRequest {
    /// Creates a request with the required account fields.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            display_name: display_name.into(),
            email: email.into(),
            avatar_url: None,
        }
    }

    /// Sets the avatar URL.
    #[must_use]
    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }
}

/// Request payload for a partial profile update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserRequest {
    display_name: Option<String>,
    email: Option<String>,
    avatar_url: Option<String>,
}

impl UpdateUserRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Sets a new email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets a new avatar URL.
    #[must_use]
    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    fn into_changes(self) -> Result<UserChanges, UserDomainError> {
        Ok(UserChanges {
            display_name: self.display_name.map(DisplayName::new).transpose()?,
            email: self.email.map(EmailAddress::new).transpose()?,
            avatar_url: self.avatar_url.map(AvatarUrl::new).transpose()?,
        })
    }
}

/// Service-level errors for user operations.
#[derive(Debug, Error)]
pub enum UserServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
    /// The user does not exist.
    #[error("user with id {0} not found")]
    NotFound(UserId),
    /// The username is already taken.
    #[error("username already exists: {0}")]
    UsernameTaken(Username),
    /// The email address is already taken.
    #[error("email already exists: {0}")]
    EmailTaken(EmailAddress),
}

impl Classify for UserServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::NotFound(_) | Self::Repository(UserRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::UsernameTaken(_)
            | Self::EmailTaken(_)
            | Self::Repository(
                UserRepositoryError::DuplicateUsername(_) | UserRepositoryError::DuplicateEmail(_),
            ) => ErrorKind::Conflict,
            Self::Repository(UserRepositoryError::Persistence(_)) => ErrorKind::Persistence,
        }
    }
}

/// Result type for user service operations.
pub type UserServiceResult<T> = Result<T, UserServiceError>;

/// User account orchestration service.
#[derive(Clone)]
pub struct UserService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> UserService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new user service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a user account.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Domain`] for malformed fields,
    /// [`UserServiceError::UsernameTaken`] or [`UserServiceError::EmailTaken`]
    /// when a unique field collides, or [`UserServiceError::Repository`] when
    /// persistence fails.
    pub async fn create_user(&self, request: CreateUserRequest) -> UserServiceResult<User> {
        let CreateUserRequest {
            username,
            display_name,
            email,
            avatar_url,
        } = request;

        let valid_username = Username::new(username)?;
        let valid_email = EmailAddress::new(email)?;
        let mut draft = UserDraft::new(
            valid_username,
            DisplayName::new(display_name)?,
            valid_email,
            &*self.clock,
        );
        if let Some(url) = avatar_url {
            draft = draft.with_avatar_url(AvatarUrl::new(url)?);
        }

        debug!(username = %draft.username(), "creating user");
        if self
            .repository
            .find_by_username(draft.username())
            .await?
            .is_some()
        {
            warn!(username = %draft.username(), "username already exists");
            return Err(UserServiceError::UsernameTaken(draft.username().clone()));
        }
        if self.repository.find_by_email(draft.email()).await?.is_some() {
            warn!(email = %draft.email(), "email already exists");
            return Err(UserServiceError::EmailTaken(draft.email().clone()));
        }

        let user = self.repository.create(draft).await?;
        info!(user_id = %user.id(), "user created");
        Ok(user)
    }

    /// Retrieves a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::NotFound`] when the user does not exist or
    /// [`UserServiceError::Repository`] when lookup fails.
    pub async fn get_user(&self, id: UserId) -> UserServiceResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserServiceError::NotFound(id))
    }

    /// Lists users one page at a time.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Repository`] when lookup fails.
    pub async fn list_users(&self, page: PageRequest) -> UserServiceResult<Page<User>> {
        Ok(self.repository.list(page).await?)
    }

    /// Applies a partial profile update.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Domain`] for malformed fields,
    /// [`UserServiceError::NotFound`] when the user does not exist,
    /// [`UserServiceError::EmailTaken`] when the new email belongs to someone
    /// else, or [`UserServiceError::Repository`] when persistence fails.
    pub async fn update_user(
        &self,
        id: UserId,
        request: UpdateUserRequest,
    ) -> UserServiceResult<User> {
        let changes = request.into_changes()?;
        let mut user = self.get_user(id).await?;

        if let Some(email) = changes.email.as_ref().filter(|email| *email != user.email()) {
            if self.repository.find_by_email(email).await?.is_some() {
                warn!(user_id = %id, email = %email, "email already exists");
                return Err(UserServiceError::EmailTaken(email.clone()));
            }
        }

        user.apply_changes(changes, &*self.clock);
        self.repository.update(&user).await?;
        info!(user_id = %id, "user updated");
        Ok(user)
    }

    /// Deletes a user permanently.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::NotFound`] when the user does not exist or
    /// [`UserServiceError::Repository`] when persistence fails.
    pub async fn delete_user(&self, id: UserId) -> UserServiceResult<()> {
        self.get_user(id).await?;
        self.repository.delete(id).await?;
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}
