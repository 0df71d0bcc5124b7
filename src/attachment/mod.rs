//! File attachment metadata for Quadrant tasks.
//!
//! Only metadata lives here; file bytes are stored elsewhere and referenced by
//! path. Uploads are checked against the configured type allow-list, per-file
//! size, and per-task count and total-size caps. Stored names are rewritten to
//! a collision-resistant safe form, and only the uploader may delete.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
