//! Unit tests for the time log module.
