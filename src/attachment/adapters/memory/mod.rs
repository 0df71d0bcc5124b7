//! In-memory adapters for attachment persistence.

mod attachment;

pub use attachment::InMemoryAttachmentRepository;
