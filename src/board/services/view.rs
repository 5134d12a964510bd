//! Render model published to the presentation layer.

use crate::board::domain::{Lanes, SortMode, TaskId};
use std::collections::HashMap;

/// Snapshot of everything a renderer needs to draw the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardView {
    /// At least one remote request is in flight.
    pub loading: bool,
    /// The last collection fetch failed. Lanes are blank while set.
    pub error: bool,
    /// Tasks per status lane, in display order.
    pub lanes: Lanes,
    /// Active sort mode.
    pub sort_mode: SortMode,
    /// Label for the sort toggle.
    pub sort_label: &'static str,
    /// Tasks in edit mode, with their unsaved text.
    pub editing: HashMap<TaskId, String>,
    /// Contents of the new-task input.
    pub new_task_text: String,
}

impl BoardView {
    /// Returns whether the task is in edit mode.
    #[must_use]
    pub fn is_editing(&self, id: &TaskId) -> bool {
        self.editing.contains_key(id)
    }

    /// Returns the unsaved text of a task in edit mode.
    #[must_use]
    pub fn draft(&self, id: &TaskId) -> Option<&str> {
        self.editing.get(id).map(String::as_str)
    }
}
