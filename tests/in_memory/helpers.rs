//! Shared test helpers for in-memory board integration tests.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use rstest::fixture;
use taskboard::board::{
    adapters::memory::InMemoryTaskRemote,
    domain::{Task, TaskId, TaskStatus, TaskText},
    ports::TaskRemote,
    services::BoardService,
};

/// Service type used by the in-memory integration tests.
pub type TestBoard = BoardService<InMemoryTaskRemote, DefaultClock>;

/// Returns a timestamp `minutes` after a fixed epoch.
///
/// # Panics
///
/// Panics if the timestamp is out of range.
#[must_use]
pub fn at(minutes: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 + minutes * 60, 0).expect("valid timestamp")
}

/// Builds a task created `minutes` after the fixed epoch.
///
/// # Panics
///
/// Panics if `text` is blank.
#[must_use]
pub fn task(id: &str, text: &str, status: TaskStatus, minutes: i64) -> Task {
    Task::new(
        TaskId::from(id),
        TaskText::new(text).expect("non-empty task text"),
        status,
        at(minutes),
    )
}

/// Remote store seeded with one task per lane.
#[fixture]
pub fn remote() -> InMemoryTaskRemote {
    InMemoryTaskRemote::with_tasks([
        task("1", "Write plan", TaskStatus::Todo, 10),
        task("2", "Build feature", TaskStatus::InProgress, 20),
        task("3", "Ship release", TaskStatus::Completed, 30),
    ])
}

/// Builds a board over a shared handle to `remote`.
#[must_use]
pub fn board_over(remote: &InMemoryTaskRemote) -> TestBoard {
    BoardService::new(Arc::new(remote.clone()), Arc::new(DefaultClock))
}

/// Identifiers in the published lane for `status`.
#[must_use]
pub fn lane_ids<R, C>(board: &BoardService<R, C>, status: TaskStatus) -> Vec<String>
where
    R: TaskRemote,
    C: Clock + Send + Sync,
{
    board
        .view()
        .lanes
        .lane(status)
        .iter()
        .map(|task| task.id().as_str().to_owned())
        .collect()
}
