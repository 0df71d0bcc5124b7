//! Adapter implementations for time log persistence.

pub mod memory;
