//! Status state machine governing moves between lanes.

use super::{TaskDomainError, TaskStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a lane move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// One lane to the right.
    Forward,
    /// One lane to the left.
    Backward,
}

impl Direction {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
        }
    }
}

impl TryFrom<&str> for Direction {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "forward" => Ok(Self::Forward),
            "backward" => Ok(Self::Backward),
            _ => Err(TaskDomainError::UnknownDirection(value.to_owned())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TaskStatus {
    /// Returns the status one lane away in `direction`.
    ///
    /// Returns `None` when the move would leave the board: backward from
    /// [`TaskStatus::Todo`] or forward from [`TaskStatus::Completed`].
    #[must_use]
    pub const fn next(self, direction: Direction) -> Option<Self> {
        match (self, direction) {
            (Self::Todo, Direction::Forward) => Some(Self::InProgress),
            (Self::InProgress, Direction::Forward) => Some(Self::Completed),
            (Self::InProgress, Direction::Backward) => Some(Self::Todo),
            (Self::Completed, Direction::Backward) => Some(Self::InProgress),
            (Self::Todo, Direction::Backward) | (Self::Completed, Direction::Forward) => None,
        }
    }

    /// Returns whether a move to `target` is legal.
    ///
    /// Only adjacent lanes are reachable. Staying in the same lane is not a
    /// transition.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        [Direction::Forward, Direction::Backward]
            .into_iter()
            .any(|direction| self.next(direction) == Some(target))
    }
}

/// Computes the target status for a move, or `None` when the move is illegal.
#[must_use]
pub const fn next_status(current: TaskStatus, direction: Direction) -> Option<TaskStatus> {
    current.next(direction)
}
