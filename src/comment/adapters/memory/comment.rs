//! In-memory repository for task comments.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::comment::{
    domain::{Comment, CommentDraft, CommentId, CommentQuery},
    ports::{CommentRepository, CommentRepositoryError, CommentRepositoryResult},
};
use crate::paging::Page;
use crate::task::domain::TaskId;

/// Thread-safe in-memory comment repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommentRepository {
    state: Arc<RwLock<InMemoryCommentState>>,
}

#[derive(Debug, Default)]
struct InMemoryCommentState {
    comments: BTreeMap<CommentId, Comment>,
    last_id: i64,
}

impl InMemoryCommentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl InMemoryCommentState {
    fn active_for_task(&self, task_id: TaskId) -> impl Iterator<Item = &Comment> {
        self.comments
            .values()
            .filter(move |comment| comment.task_id() == task_id && !comment.is_deleted())
    }
}

fn lock_error(err: impl ToString) -> CommentRepositoryError {
    CommentRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn create(&self, draft: CommentDraft) -> CommentRepositoryResult<Comment> {
        let mut state = self.state.write().map_err(lock_error)?;
        let next_id = state.last_id + 1;
        let id = CommentId::new(next_id).map_err(CommentRepositoryError::persistence)?;
        let comment = Comment::from_draft(id, draft);
        state.last_id = next_id;
        state.comments.insert(id, comment.clone());
        Ok(comment)
    }

    async fn update(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .comments
            .get_mut(&comment.id())
            .ok_or(CommentRepositoryError::NotFound(comment.id()))?;
        *stored = comment.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: CommentId) -> CommentRepositoryResult<Option<Comment>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .comments
            .get(&id)
            .filter(|comment| !comment.is_deleted())
            .cloned())
    }

    async fn find_by_id_including_deleted(
        &self,
        id: CommentId,
    ) -> CommentRepositoryResult<Option<Comment>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.comments.get(&id).cloned())
    }

    async fn find_by_task(&self, task_id: TaskId) -> CommentRepositoryResult<Vec<Comment>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut comments: Vec<Comment> = state.active_for_task(task_id).cloned().collect();
        comments.sort_by(|left, right| {
            left.created_at()
                .cmp(&right.created_at())
                .then_with(|| left.id().cmp(&right.id()))
        });
        Ok(comments)
    }

    async fn list(&self, query: &CommentQuery) -> CommentRepositoryResult<Page<Comment>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut matching: Vec<Comment> = state
            .comments
            .values()
            .filter(|comment| query.matches(comment))
            .cloned()
            .collect();
        matching.sort_by(|left, right| query.compare(left, right));
        Ok(query.page.paginate(matching))
    }

    async fn count_by_task(&self, task_id: TaskId) -> CommentRepositoryResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.active_for_task(task_id).count())
    }

    async fn delete_by_task(&self, task_id: TaskId) -> CommentRepositoryResult<usize> {
        let mut state = self.state.write().map_err(lock_error)?;
        let before = state.comments.len();
        state
            .comments
            .retain(|_, comment| comment.task_id() != task_id);
        Ok(before.saturating_sub(state.comments.len()))
    }
}
