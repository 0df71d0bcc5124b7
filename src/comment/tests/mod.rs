//! Unit tests for the comment module.

mod thread_tests;
