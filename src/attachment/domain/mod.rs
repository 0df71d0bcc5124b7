//! Domain model for attachments.

mod attachment;
mod error;
mod file;
mod ids;
mod query;
pub mod rules;

pub use attachment::{Attachment, AttachmentDraft, PersistedAttachmentData};
pub use error::AttachmentDomainError;
pub use file::{FileCategory, FileName, FilePath, file_extension, format_file_size, safe_file_name};
pub use ids::AttachmentId;
pub use query::{AttachmentQuery, AttachmentSortField};
