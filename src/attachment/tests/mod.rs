//! Unit tests for the attachment module.

mod file_tests;
