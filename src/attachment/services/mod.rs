//! Application services for task attachments.

mod uploads;

pub use uploads::{
    AttachmentService, AttachmentServiceError, AttachmentServiceResult, CreateAttachmentRequest,
};
