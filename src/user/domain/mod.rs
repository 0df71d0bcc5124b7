//! Domain model for user accounts.

mod contact;
mod error;
mod ids;
mod name;
mod user;

pub use contact::{AvatarUrl, EmailAddress};
pub use error::UserDomainError;
pub use ids::UserId;
pub use name::{DisplayName, Username};
pub use user::{PersistedUserData, User, UserChanges, UserDraft};
