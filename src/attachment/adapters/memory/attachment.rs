//! In-memory repository for attachment metadata.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::attachment::{
    domain::{Attachment, AttachmentDraft, AttachmentId, AttachmentQuery},
    ports::{AttachmentRepository, AttachmentRepositoryError, AttachmentRepositoryResult},
};
use crate::paging::Page;
use crate::task::domain::TaskId;

/// Thread-safe in-memory attachment repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttachmentRepository {
    state: Arc<RwLock<InMemoryAttachmentState>>,
}

#[derive(Debug, Default)]
struct InMemoryAttachmentState {
    attachments: BTreeMap<AttachmentId, Attachment>,
    last_id: i64,
}

impl InMemoryAttachmentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl InMemoryAttachmentState {
    fn for_task(&self, task_id: TaskId) -> impl Iterator<Item = &Attachment> {
        self.attachments
            .values()
            .filter(move |attachment| attachment.task_id() == task_id)
    }
}

fn lock_error(err: impl ToString) -> AttachmentRepositoryError {
    AttachmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl AttachmentRepository for InMemoryAttachmentRepository {
    async fn create(&self, draft: AttachmentDraft) -> AttachmentRepositoryResult<Attachment> {
        let mut state = self.state.write().map_err(lock_error)?;
        let next_id = state.last_id + 1;
        let id = AttachmentId::new(next_id).map_err(AttachmentRepositoryError::persistence)?;
        let attachment = Attachment::from_draft(id, draft);
        state.last_id = next_id;
        state.attachments.insert(id, attachment.clone());
        Ok(attachment)
    }

    async fn find_by_id(
        &self,
        id: AttachmentId,
    ) -> AttachmentRepositoryResult<Option<Attachment>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.attachments.get(&id).cloned())
    }

    async fn find_by_task(&self, task_id: TaskId) -> AttachmentRepositoryResult<Vec<Attachment>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut attachments: Vec<Attachment> = state.for_task(task_id).cloned().collect();
        attachments.sort_by(|left, right| {
            left.uploaded_at()
                .cmp(&right.uploaded_at())
                .then_with(|| left.id().cmp(&right.id()))
        });
        Ok(attachments)
    }

    async fn list(
        &self,
        query: &AttachmentQuery,
    ) -> AttachmentRepositoryResult<Page<Attachment>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut matching: Vec<Attachment> = state
            .attachments
            .values()
            .filter(|attachment| query.matches(attachment))
            .cloned()
            .collect();
        matching.sort_by(|left, right| query.compare(left, right));
        Ok(query.page.paginate(matching))
    }

    async fn count_by_task(&self, task_id: TaskId) -> AttachmentRepositoryResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.for_task(task_id).count())
    }

    async fn total_size_by_task(&self, task_id: TaskId) -> AttachmentRepositoryResult<u64> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .for_task(task_id)
            .fold(0_u64, |total, attachment| {
                total.saturating_add(attachment.file_size())
            }))
    }

    async fn delete(&self, id: AttachmentId) -> AttachmentRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .attachments
            .remove(&id)
            .map(|_| ())
            .ok_or(AttachmentRepositoryError::NotFound(id))
    }

    async fn delete_by_task(&self, task_id: TaskId) -> AttachmentRepositoryResult<usize> {
        let mut state = self.state.write().map_err(lock_error)?;
        let before = state.attachments.len();
        state
            .attachments
            .retain(|_, attachment| attachment.task_id() != task_id);
        Ok(before.saturating_sub(state.attachments.len()))
    }
}
