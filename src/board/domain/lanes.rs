//! Derivation of the three status lanes from the canonical collection.

use super::{SortMode, Task, TaskStatus};

/// Tasks split by status, each lane in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lanes {
    todo: Vec<Task>,
    in_progress: Vec<Task>,
    completed: Vec<Task>,
}

impl Lanes {
    /// Returns the lane holding tasks with `status`.
    #[must_use]
    pub fn lane(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Completed => &self.completed,
        }
    }

    /// Returns the `todo` lane.
    #[must_use]
    pub fn todo(&self) -> &[Task] {
        &self.todo
    }

    /// Returns the `in-progress` lane.
    #[must_use]
    pub fn in_progress(&self) -> &[Task] {
        &self.in_progress
    }

    /// Returns the `completed` lane.
    #[must_use]
    pub fn completed(&self) -> &[Task] {
        &self.completed
    }

    /// Returns the total number of tasks across all lanes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.completed.len()
    }

    /// Returns `true` when every lane is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates lanes left to right together with their status.
    pub fn iter(&self) -> impl Iterator<Item = (TaskStatus, &[Task])> {
        TaskStatus::ALL
            .into_iter()
            .map(move |status| (status, self.lane(status)))
    }

    fn lane_mut(&mut self, status: TaskStatus) -> &mut Vec<Task> {
        match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Completed => &mut self.completed,
        }
    }
}

/// Derives the three lanes from `collection` under `sort_mode`.
///
/// The whole collection is ordered first and partitioned second, so the same
/// tie-break applies in every lane. Sorting is stable: tasks with equal
/// `createdAt` keep their canonical order in both directions, and
/// [`SortMode::Default`] leaves the canonical order untouched.
#[must_use]
pub fn derive_lanes(collection: &[Task], sort_mode: SortMode) -> Lanes {
    let mut ordered: Vec<&Task> = collection.iter().collect();
    match sort_mode {
        SortMode::Default => {}
        SortMode::Ascending => ordered.sort_by_key(|task| task.created_at()),
        SortMode::Descending => {
            ordered.sort_by(|left, right| right.created_at().cmp(&left.created_at()));
        }
    }

    ordered.into_iter().fold(Lanes::default(), |mut lanes, task| {
        lanes.lane_mut(task.status()).push(task.clone());
        lanes
    })
}
