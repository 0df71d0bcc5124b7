//! Filter, sort, and paging criteria for attachment listings.

use super::Attachment;
use crate::paging::{PageRequest, SortOrder};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Field an attachment listing is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentSortField {
    /// Upload timestamp.
    #[default]
    UploadedAt,
    /// Stored file name.
    FileName,
    /// Size in bytes.
    FileSize,
}

/// Criteria for listing attachments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentQuery {
    /// Required owning task.
    pub task_id: Option<TaskId>,
    /// Required uploader.
    pub uploaded_by: Option<UserId>,
    /// Required MIME type.
    pub file_type: Option<String>,
    /// Sort field.
    pub sort: AttachmentSortField,
    /// Sort direction.
    pub order: SortOrder,
    /// Page window.
    pub page: PageRequest,
}

impl AttachmentQuery {
    /// Returns `true` when `attachment` satisfies every filter.
    #[must_use]
    pub fn matches(&self, attachment: &Attachment) -> bool {
        self.task_id.is_none_or(|task| attachment.task_id() == task)
            && self
                .uploaded_by
                .is_none_or(|user| attachment.uploaded_by() == user)
            && self
                .file_type
                .as_deref()
                .is_none_or(|mime| attachment.file_type() == mime)
    }

    /// Compares two attachments in the requested order, breaking ties by id.
    #[must_use]
    pub fn compare(&self, left: &Attachment, right: &Attachment) -> Ordering {
        let primary = match self.sort {
            AttachmentSortField::UploadedAt => left.uploaded_at().cmp(&right.uploaded_at()),
            AttachmentSortField::FileName => left.stored_name().cmp(right.stored_name()),
            AttachmentSortField::FileSize => left.file_size().cmp(&right.file_size()),
        };
        self.order
            .apply(primary.then_with(|| left.id().cmp(&right.id())))
    }
}
