//! Step definitions for task lifecycle rule scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
