//! Domain model for task comments.

mod comment;
mod content;
mod error;
mod ids;
pub mod policy;
mod query;
mod thread;

pub use comment::{Comment, CommentDraft, PersistedCommentData};
pub use content::{CommentContent, sanitize_content};
pub use error::CommentDomainError;
pub use ids::CommentId;
pub use query::{CommentQuery, CommentSortField};
pub use thread::{CommentReply, CommentThread, OrphanPolicy, assemble_threads};
