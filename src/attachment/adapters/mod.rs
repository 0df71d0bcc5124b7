//! Adapter implementations for attachment persistence.

pub mod memory;
