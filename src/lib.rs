//! Quadrant: task-management core.
//!
//! This crate provides the business rules and orchestration services behind a
//! task-management API: tasks classified by Eisenhower quadrant, threaded
//! comments, time tracking, file attachments, and the users who own them.
//!
//! # Architecture
//!
//! Quadrant follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: Concrete implementations of ports
//! - **Services**: Request validation and orchestration over ports
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle rules, quadrant classification, bulk operations
//! - [`comment`]: Task comments and reply threading
//! - [`time_log`]: Time tracking against tasks
//! - [`attachment`]: File attachment metadata and upload limits
//! - [`user`]: User accounts referenced by the other contexts
//! - [`config`]: Tunable service limits
//! - [`error`]: Cross-context error classification
//! - [`paging`]: Limit/offset paging shared by list queries

pub mod attachment;
pub mod comment;
pub mod config;
pub mod error;
pub mod paging;
pub mod task;
pub mod time_log;
pub mod user;

#[cfg(test)]
mod test_support;
