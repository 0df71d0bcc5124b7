//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use crate::paging::Page;
use crate::task::{
    domain::{Task, TaskDraft, TaskId, TaskQuery},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: i64,
    children_index: HashMap<TaskId, BTreeSet<TaskId>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl InMemoryTaskState {
    fn index_child(&mut self, task: &Task) {
        if let Some(parent_id) = task.parent_id() {
            self.children_index
                .entry(parent_id)
                .or_default()
                .insert(task.id());
        }
    }

    fn unindex_child(&mut self, task_id: TaskId, parent_id: Option<TaskId>) {
        let Some(parent) = parent_id else {
            return;
        };
        if let Some(children) = self.children_index.get_mut(&parent) {
            children.remove(&task_id);
            if children.is_empty() {
                self.children_index.remove(&parent);
            }
        }
    }

    /// Runs `change` against a stored task and bumps its revision on success.
    fn modify(
        &mut self,
        id: TaskId,
        change: impl FnOnce(&mut Task) -> bool,
    ) -> TaskRepositoryResult<Task> {
        let stored = self
            .tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        if !change(stored) {
            return Err(TaskRepositoryError::NotFound(id));
        }
        stored.bump_revision();
        Ok(stored.clone())
    }
}

fn lock_error(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, draft: TaskDraft) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(lock_error)?;
        let next_id = state.last_id + 1;
        let id = TaskId::new(next_id).map_err(TaskRepositoryError::persistence)?;
        let task = Task::from_draft(id, draft);
        state.last_id = next_id;
        state.index_child(&task);
        state.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .tasks
            .get(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        if stored.revision() != task.revision() {
            return Err(TaskRepositoryError::RevisionConflict {
                id: task.id(),
                expected: task.revision(),
                actual: stored.revision(),
            });
        }

        let previous_parent = stored.parent_id();
        let mut next = task.clone();
        next.bump_revision();
        if previous_parent != next.parent_id() {
            state.unindex_child(next.id(), previous_parent);
            state.index_child(&next);
        }
        state.tasks.insert(next.id(), next.clone());
        Ok(next)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .tasks
            .get(&id)
            .filter(|task| !task.is_deleted())
            .cloned())
    }

    async fn find_by_id_including_deleted(
        &self,
        id: TaskId,
    ) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_children(&self, parent_id: TaskId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .children_index
            .get(&parent_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.tasks.get(id))
                    .filter(|task| !task.is_deleted())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list(
        &self,
        query: &TaskQuery,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<Page<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut matching: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| query.matches(task, now))
            .cloned()
            .collect();
        matching.sort_by(|left, right| query.compare(left, right));
        Ok(query.page.paginate(matching))
    }

    async fn soft_delete(&self, id: TaskId, at: DateTime<Utc>) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.modify(id, |task| task.mark_deleted(at).is_ok())
    }

    async fn restore(&self, id: TaskId, at: DateTime<Utc>) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.modify(id, |task| task.restore(at).is_ok())
    }

    async fn permanent_delete(&self, id: TaskId, at: DateTime<Utc>) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let removed = state
            .tasks
            .remove(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        state.unindex_child(id, removed.parent_id());

        let orphans = state.children_index.remove(&id).unwrap_or_default();
        for child_id in orphans {
            if let Some(child) = state.tasks.get_mut(&child_id) {
                child.detach_parent(at);
                child.bump_revision();
            }
        }
        Ok(())
    }
}
