//! Application services for task comments.

mod discussion;

pub use discussion::{
    CommentService, CommentServiceError, CommentServiceResult, CreateCommentRequest,
};
