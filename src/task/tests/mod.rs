//! Unit tests for the task module.

mod domain_tests;
mod state_transition_tests;
