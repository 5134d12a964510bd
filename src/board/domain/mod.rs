//! Domain model for the kanban board.
//!
//! The board domain models tasks, the status state machine that governs
//! moves between lanes, and the pure derivation of lanes from the canonical
//! collection. Transport and rendering concerns stay outside this boundary.

mod error;
mod ids;
mod lanes;
mod sort;
mod task;
mod transition;

pub use error::TaskDomainError;
pub use ids::TaskId;
pub use lanes::{Lanes, derive_lanes};
pub use sort::SortMode;
pub use task::{NewTask, Task, TaskPatch, TaskStatus, TaskText};
pub use transition::{Direction, next_status};
