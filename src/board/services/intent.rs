//! User intents accepted by the board and the outcomes they produce.

use crate::board::domain::{Direction, TaskId};
use std::fmt;

/// An intent emitted by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardIntent {
    /// Create a task from the given text.
    CreateRequested(String),
    /// Delete a task.
    DeleteRequested(TaskId),
    /// Enter or leave edit mode for a task.
    EditToggled(TaskId),
    /// Commit the edited text of a task.
    EditCommitted(TaskId, String),
    /// Move a task one lane in a direction.
    MoveRequested(TaskId, Direction),
    /// Advance the sort mode.
    SortToggled,
}

/// Result of an intent that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The change was confirmed and applied.
    Applied,
    /// Local edits were discarded by refetching the collection.
    Reverted,
    /// Nothing was sent to the remote store.
    Skipped(SkipReason),
}

/// Why an intent was resolved locally without a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The text was empty after trimming.
    EmptyText,
    /// The move would leave the board.
    IllegalTransition,
    /// The task already has the requested status.
    Unchanged,
    /// The task is not in edit mode.
    NotEditing,
}

impl SkipReason {
    /// Returns a short human-readable explanation.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::EmptyText => "task text is empty",
            Self::IllegalTransition => "the task cannot move in that direction",
            Self::Unchanged => "the task already has that status",
            Self::NotEditing => "the task is not being edited",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
