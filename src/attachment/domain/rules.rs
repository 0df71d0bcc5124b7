//! Upload limits and deletion rights for attachments.

use super::{Attachment, AttachmentDomainError};
use crate::config::AttachmentLimits;
use crate::task::domain::TaskId;
use crate::user::domain::UserId;

/// Returns `true` when `file_type` is on the allow-list.
#[must_use]
pub fn is_allowed_file_type(limits: &AttachmentLimits, file_type: &str) -> bool {
    limits.allows(file_type)
}

/// Returns `true` for a non-empty file within `max` bytes.
#[must_use]
pub const fn is_valid_file_size(size: u64, max: u64) -> bool {
    size > 0 && size <= max
}

/// Returns `true` while a task holds fewer than `max` attachments.
#[must_use]
pub const fn can_add_attachment(existing: usize, max: usize) -> bool {
    existing < max
}

/// Returns `true` when adding `size` bytes keeps the task within `max` bytes.
#[must_use]
pub const fn can_add_by_size(existing_total: u64, size: u64, max: u64) -> bool {
    match existing_total.checked_add(size) {
        Some(total) => total <= max,
        None => false,
    }
}

/// Returns `true` when `user_id` uploaded the attachment.
#[must_use]
pub fn can_delete(attachment: &Attachment, user_id: UserId) -> bool {
    attachment.uploaded_by() == user_id
}

/// Checks a file's type and size against `limits`.
///
/// # Errors
///
/// Returns [`AttachmentDomainError::FileTypeNotAllowed`],
/// [`AttachmentDomainError::EmptyFile`], or
/// [`AttachmentDomainError::FileTooLarge`].
pub fn ensure_acceptable_file(
    limits: &AttachmentLimits,
    file_type: &str,
    size: u64,
) -> Result<(), AttachmentDomainError> {
    if !is_allowed_file_type(limits, file_type) {
        return Err(AttachmentDomainError::FileTypeNotAllowed(file_type.to_owned()));
    }
    if size == 0 {
        return Err(AttachmentDomainError::EmptyFile);
    }
    if !is_valid_file_size(size, limits.max_file_size_bytes) {
        return Err(AttachmentDomainError::FileTooLarge {
            size,
            max: limits.max_file_size_bytes,
        });
    }
    Ok(())
}

/// Checks that a task can take one more attachment of `size` bytes.
///
/// # Errors
///
/// Returns [`AttachmentDomainError::LimitReached`] or
/// [`AttachmentDomainError::TotalSizeExceeded`].
pub const fn ensure_task_capacity(
    limits: &AttachmentLimits,
    task_id: TaskId,
    existing_count: usize,
    existing_total: u64,
    size: u64,
) -> Result<(), AttachmentDomainError> {
    if !can_add_attachment(existing_count, limits.max_per_task) {
        return Err(AttachmentDomainError::LimitReached {
            task_id,
            max: limits.max_per_task,
        });
    }
    if !can_add_by_size(existing_total, size, limits.max_total_size_bytes) {
        return Err(AttachmentDomainError::TotalSizeExceeded {
            task_id,
            max: limits.max_total_size_bytes,
        });
    }
    Ok(())
}

/// Rejects deletion by anyone but the uploader.
///
/// # Errors
///
/// Returns [`AttachmentDomainError::NotUploader`] when [`can_delete`] is
/// `false`.
pub fn ensure_can_delete(
    attachment: &Attachment,
    user_id: UserId,
) -> Result<(), AttachmentDomainError> {
    if can_delete(attachment, user_id) {
        Ok(())
    } else {
        Err(AttachmentDomainError::NotUploader {
            attachment_id: attachment.id(),
            user_id,
        })
    }
}
