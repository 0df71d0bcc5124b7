//! In-memory repository for user accounts.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::paging::{Page, PageRequest};
use crate::user::{
    domain::{EmailAddress, User, UserDraft, UserId, Username},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: BTreeMap<UserId, User>,
    last_id: i64,
    username_index: HashMap<Username, UserId>,
    email_index: HashMap<EmailAddress, UserId>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> UserRepositoryError {
    UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, draft: UserDraft) -> UserRepositoryResult<User> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.username_index.contains_key(draft.username()) {
            return Err(UserRepositoryError::DuplicateUsername(
                draft.username().clone(),
            ));
        }
        if state.email_index.contains_key(draft.email()) {
            return Err(UserRepositoryError::DuplicateEmail(draft.email().clone()));
        }

        let next_id = state.last_id + 1;
        let id = UserId::new(next_id).map_err(UserRepositoryError::persistence)?;
        let user = User::from_draft(id, draft);
        state.last_id = next_id;
        state.username_index.insert(user.username().clone(), id);
        state.email_index.insert(user.email().clone(), id);
        state.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let previous_email = state
            .users
            .get(&user.id())
            .ok_or(UserRepositoryError::NotFound(user.id()))?
            .email()
            .clone();

        if previous_email != *user.email() {
            if state.email_index.contains_key(user.email()) {
                return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
            }
            state.email_index.remove(&previous_email);
            state.email_index.insert(user.email().clone(), user.id());
        }
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .username_index
            .get(username)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .email_index
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn list(&self, page: PageRequest) -> UserRepositoryResult<Page<User>> {
        let state = self.state.read().map_err(lock_error)?;
        let users: Vec<User> = state.users.values().cloned().collect();
        Ok(page.paginate(users))
    }

    async fn delete(&self, id: UserId) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let removed = state
            .users
            .remove(&id)
            .ok_or(UserRepositoryError::NotFound(id))?;
        state.username_index.remove(removed.username());
        state.email_index.remove(removed.email());
        Ok(())
    }
}
