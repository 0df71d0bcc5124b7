//! Task lifecycle management for Quadrant.
//!
//! Tasks are classified into an Eisenhower quadrant derived from their
//! importance and urgency flags, move through `TODO`/`DOING`/`PENDING`/`DONE`
//! statuses, and are soft-deleted before they can be purged. Completing a task
//! freezes its status and priority. Subtasks reference their parent by
//! identifier. The module follows hexagonal architecture:
//!
//! - Domain types and pure lifecycle rules in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services, including bulk operations, in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
