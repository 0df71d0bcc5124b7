//! In-memory repository for time logs.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::paging::Page;
use crate::task::domain::TaskId;
use crate::time_log::{
    domain::{TimeLog, TimeLogDraft, TimeLogId, TimeLogQuery, rules},
    ports::{TimeLogRepository, TimeLogRepositoryError, TimeLogRepositoryResult},
};
use crate::user::domain::UserId;

/// Thread-safe in-memory time log repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTimeLogRepository {
    state: Arc<RwLock<InMemoryTimeLogState>>,
}

#[derive(Debug, Default)]
struct InMemoryTimeLogState {
    logs: BTreeMap<TimeLogId, TimeLog>,
    last_id: i64,
}

impl InMemoryTimeLogRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl InMemoryTimeLogState {
    fn collect_by(&self, keep: impl Fn(&TimeLog) -> bool) -> Vec<TimeLog> {
        let mut logs: Vec<TimeLog> = self.logs.values().filter(|log| keep(log)).cloned().collect();
        logs.sort_by(|left, right| {
            left.started_at()
                .cmp(&right.started_at())
                .then_with(|| left.id().cmp(&right.id()))
        });
        logs
    }
}

fn lock_error(err: impl ToString) -> TimeLogRepositoryError {
    TimeLogRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TimeLogRepository for InMemoryTimeLogRepository {
    async fn create(&self, draft: TimeLogDraft) -> TimeLogRepositoryResult<TimeLog> {
        let mut state = self.state.write().map_err(lock_error)?;
        let next_id = state.last_id + 1;
        let id = TimeLogId::new(next_id).map_err(TimeLogRepositoryError::persistence)?;
        let log = TimeLog::from_draft(id, draft);
        state.last_id = next_id;
        state.logs.insert(id, log.clone());
        Ok(log)
    }

    async fn update(&self, log: &TimeLog) -> TimeLogRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .logs
            .get_mut(&log.id())
            .ok_or(TimeLogRepositoryError::NotFound(log.id()))?;
        *stored = log.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TimeLogId) -> TimeLogRepositoryResult<Option<TimeLog>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.logs.get(&id).cloned())
    }

    async fn find_by_task(&self, task_id: TaskId) -> TimeLogRepositoryResult<Vec<TimeLog>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.collect_by(|log| log.task_id() == task_id))
    }

    async fn find_by_user(&self, user_id: UserId) -> TimeLogRepositoryResult<Vec<TimeLog>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.collect_by(|log| log.user_id() == user_id))
    }

    async fn find_active_by_user(
        &self,
        user_id: UserId,
    ) -> TimeLogRepositoryResult<Vec<TimeLog>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.collect_by(|log| log.user_id() == user_id && rules::is_active(log)))
    }

    async fn list(&self, query: &TimeLogQuery) -> TimeLogRepositoryResult<Page<TimeLog>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut matching: Vec<TimeLog> = state
            .logs
            .values()
            .filter(|log| query.matches(log))
            .cloned()
            .collect();
        matching.sort_by(|left, right| query.compare(left, right));
        Ok(query.page.paginate(matching))
    }

    async fn delete(&self, id: TimeLogId) -> TimeLogRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .logs
            .remove(&id)
            .map(|_| ())
            .ok_or(TimeLogRepositoryError::NotFound(id))
    }

    async fn delete_by_task(&self, task_id: TaskId) -> TimeLogRepositoryResult<usize> {
        let mut state = self.state.write().map_err(lock_error)?;
        let before = state.logs.len();
        state.logs.retain(|_, log| log.task_id() != task_id);
        Ok(before.saturating_sub(state.logs.len()))
    }
}
