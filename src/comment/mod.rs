//! Task comments and reply threading for Quadrant.
//!
//! Comments belong to one task and may reply to another comment on the same
//! task. Content is sanitised before it is stored, only the author may change
//! a comment, and deletion is soft so comments can be restored. The threaded
//! view nests replies one level under their root comment.
//!
//! - Domain types, policy rules, and the thread assembler in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
