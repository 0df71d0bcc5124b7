//! User accounts for Quadrant.
//!
//! Users are referenced by tasks (creator, assignee), comments (author), time
//! logs, and attachments (uploader) by identifier only; they do not own the
//! lifecycle of those entities. Usernames and email addresses are unique.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
