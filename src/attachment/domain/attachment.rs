//! Attachment entity and the data needed to create one.

use super::{AttachmentId, FileCategory, FileName, FilePath};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validated metadata for an upload that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentDraft {
    /// Task receiving the upload.
    pub task_id: TaskId,
    /// Uploader.
    pub uploaded_by: UserId,
    /// Name as uploaded.
    pub original_name: FileName,
    /// Safe name the bytes are stored under.
    pub stored_name: String,
    /// Size in bytes.
    pub file_size: u64,
    /// MIME type.
    pub file_type: String,
    /// Storage path.
    pub file_path: FilePath,
    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
}

/// Metadata of a file attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    id: AttachmentId,
    task_id: TaskId,
    uploaded_by: UserId,
    original_name: FileName,
    stored_name: String,
    file_size: u64,
    file_type: String,
    file_path: FilePath,
    uploaded_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAttachmentData {
    /// Persisted identifier.
    pub id: AttachmentId,
    /// Persisted owning task.
    pub task_id: TaskId,
    /// Persisted uploader.
    pub uploaded_by: UserId,
    /// Persisted name as uploaded.
    pub original_name: FileName,
    /// Persisted safe stored name.
    pub stored_name: String,
    /// Persisted size in bytes.
    pub file_size: u64,
    /// Persisted MIME type.
    pub file_type: String,
    /// Persisted storage path.
    pub file_path: FilePath,
    /// Persisted upload timestamp.
    pub uploaded_at: DateTime<Utc>,
}

impl Attachment {
    /// Materialises a draft under the identifier assigned by storage.
    #[must_use]
    pub fn from_draft(id: AttachmentId, draft: AttachmentDraft) -> Self {
        Self {
            id,
            task_id: draft.task_id,
            uploaded_by: draft.uploaded_by,
            original_name: draft.original_name,
            stored_name: draft.stored_name,
            file_size: draft.file_size,
            file_type: draft.file_type,
            file_path: draft.file_path,
            uploaded_at: draft.uploaded_at,
        }
    }

    /// Reconstructs an attachment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAttachmentData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            uploaded_by: data.uploaded_by,
            original_name: data.original_name,
            stored_name: data.stored_name,
            file_size: data.file_size,
            file_type: data.file_type,
            file_path: data.file_path,
            uploaded_at: data.uploaded_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> AttachmentId {
        self.id
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the uploader.
    #[must_use]
    pub const fn uploaded_by(&self) -> UserId {
        self.uploaded_by
    }

    /// Returns the name the file was uploaded with.
    #[must_use]
    pub const fn original_name(&self) -> &FileName {
        &self.original_name
    }

    /// Returns the safe name the file is stored under.
    #[must_use]
    pub fn stored_name(&self) -> &str {
        &self.stored_name
    }

    /// Returns the size in bytes.
    #[must_use]
    pub const fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Returns the MIME type.
    #[must_use]
    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    /// Returns the storage path.
    #[must_use]
    pub const fn file_path(&self) -> &FilePath {
        &self.file_path
    }

    /// Returns the upload timestamp.
    #[must_use]
    pub const fn uploaded_at(&self) -> DateTime<Utc> {
        self.uploaded_at
    }

    /// Returns the broad kind of file.
    #[must_use]
    pub fn category(&self) -> FileCategory {
        FileCategory::from_mime(&self.file_type)
    }
}
