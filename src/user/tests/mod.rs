//! Unit tests for the user module.

mod service_tests;
