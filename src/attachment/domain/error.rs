//! Error types for attachment validation and upload limits.

use super::AttachmentId;
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use thiserror::Error;

/// Errors returned while validating attachment uploads.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AttachmentDomainError {
    /// The attachment identifier is not a positive integer.
    #[error("invalid attachment id {0}, expected a positive integer")]
    InvalidAttachmentId(i64),

    /// The file name is empty after trimming.
    #[error("file name must not be empty")]
    EmptyFileName,

    /// The file name exceeds the character limit.
    #[error("file name exceeds {max} character limit")]
    FileNameTooLong {
        /// Maximum permitted length in characters.
        max: usize,
    },

    /// The file name contains a path-hostile or control character.
    #[error("file name contains forbidden character {0:?}")]
    ForbiddenCharacter(char),

    /// The file name is a reserved device name.
    #[error("file name {0} is reserved")]
    ReservedFileName(String),

    /// The file path is blank.
    #[error("file path must not be blank")]
    BlankFilePath,

    /// The MIME type is not on the allow-list.
    #[error("file type {0} is not allowed")]
    FileTypeNotAllowed(String),

    /// The file is empty.
    #[error("file must not be empty")]
    EmptyFile,

    /// The file exceeds the per-file size limit.
    #[error("file size {size} bytes exceeds the maximum of {max} bytes")]
    FileTooLarge {
        /// Rejected size in bytes.
        size: u64,
        /// Configured limit in bytes.
        max: u64,
    },

    /// The task already holds the maximum number of attachments.
    #[error("task {task_id} already has the maximum of {max} attachments")]
    LimitReached {
        /// Task receiving the upload.
        task_id: TaskId,
        /// Configured limit.
        max: usize,
    },

    /// The upload would push the task past its total size limit.
    #[error("attachments on task {task_id} would exceed the total limit of {max} bytes")]
    TotalSizeExceeded {
        /// Task receiving the upload.
        task_id: TaskId,
        /// Configured limit in bytes.
        max: u64,
    },

    /// Someone other than the uploader tried to delete the attachment.
    #[error("user {user_id} did not upload attachment {attachment_id}")]
    NotUploader {
        /// Attachment being deleted.
        attachment_id: AttachmentId,
        /// User who attempted the deletion.
        user_id: UserId,
    },
}

impl AttachmentDomainError {
    /// Returns the request field the error refers to, if any.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidAttachmentId(_) => Some("id"),
            Self::EmptyFileName
            | Self::FileNameTooLong { .. }
            | Self::ForbiddenCharacter(_)
            | Self::ReservedFileName(_) => Some("fileName"),
            Self::BlankFilePath => Some("filePath"),
            Self::FileTypeNotAllowed(_) => Some("fileType"),
            Self::EmptyFile | Self::FileTooLarge { .. } | Self::TotalSizeExceeded { .. } => {
                Some("fileSize")
            }
            Self::LimitReached { .. } | Self::NotUploader { .. } => None,
        }
    }
}
