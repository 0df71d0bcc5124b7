//! Application services for user account management.

mod accounts;

pub use accounts::{
    CreateUserRequest, UpdateUserRequest, UserService, UserServiceError, UserServiceResult,
};
