//! Time tracking against tasks for Quadrant.
//!
//! A time log is a start/end interval one user spends on one task. A user has
//! at most one running log, manually recorded intervals must not overlap the
//! user's other logs, and durations are stored in whole seconds.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
