//! Canonical in-memory task collection.

use crate::board::domain::{Task, TaskId, TaskPatch};
use std::collections::HashSet;
use thiserror::Error;

/// Errors returned by [`TaskStore`] mutations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskStoreError {
    /// A task with the same identifier is already present.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),
}

/// The single source of truth for the board.
///
/// Order reflects fetch and insert order, not display order. Every operation
/// is synchronous and local; callers re-derive lanes afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Replaces the whole collection, typically after a full fetch.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateTask`] when `tasks` repeats an
    /// identifier. The store is left unchanged in that case.
    pub fn replace_all(&mut self, tasks: Vec<Task>) -> Result<(), TaskStoreError> {
        if let Some(id) = first_duplicate(&tasks) {
            return Err(TaskStoreError::DuplicateTask(id.clone()));
        }
        self.tasks = tasks;
        Ok(())
    }

    /// Appends a newly created task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateTask`] when the identifier is
    /// already present.
    pub fn insert(&mut self, task: Task) -> Result<(), TaskStoreError> {
        if self.contains(task.id()) {
            return Err(TaskStoreError::DuplicateTask(task.id().clone()));
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Stores a confirmed task, replacing any entry with the same identifier
    /// in place and appending otherwise.
    ///
    /// Returns `true` when an existing entry was replaced.
    pub fn upsert(&mut self, task: Task) -> bool {
        match self.tasks.iter_mut().find(|existing| existing.id() == task.id()) {
            Some(existing) => {
                *existing = task;
                true
            }
            None => {
                self.tasks.push(task);
                false
            }
        }
    }

    /// Merges `patch` into the task matching `id`.
    ///
    /// Returns the updated task, or `None` when `id` is absent.
    pub fn update_fields(&mut self, id: &TaskId, patch: &TaskPatch) -> Option<&Task> {
        let task = self.tasks.iter_mut().find(|task| task.id() == id)?;
        task.apply(patch);
        Some(task)
    }

    /// Removes the task matching `id`.
    ///
    /// Returns the removed task, or `None` when `id` is absent.
    pub fn remove(&mut self, id: &TaskId) -> Option<Task> {
        let position = self.tasks.iter().position(|task| task.id() == id)?;
        Some(self.tasks.remove(position))
    }

    /// Returns the task matching `id`.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns whether a task with `id` is present.
    #[must_use]
    pub fn contains(&self, id: &TaskId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the collection in canonical order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the store holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

fn first_duplicate(tasks: &[Task]) -> Option<&TaskId> {
    let mut seen = HashSet::with_capacity(tasks.len());
    tasks.iter().map(Task::id).find(|id| !seen.insert(*id))
}
