//! Shared world state for board synchronisation BDD scenarios.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use taskboard::board::{
    adapters::memory::{InMemoryTaskRemote, RemoteOperation},
    domain::{Task, TaskId, TaskStatus, TaskText},
    services::{BoardResult, BoardService, Outcome},
};

/// Service type used by the BDD world.
pub type TestBoard = BoardService<InMemoryTaskRemote, DefaultClock>;

/// Scenario world for board synchronisation behaviour tests.
pub struct BoardWorld {
    pub remote: InMemoryTaskRemote,
    pub board: TestBoard,
    pub seed: Vec<Task>,
    pub last_result: Option<BoardResult<Outcome>>,
}

impl BoardWorld {
    /// Creates a world over an empty remote store.
    #[must_use]
    pub fn new() -> Self {
        let remote = InMemoryTaskRemote::new();
        let board = BoardService::new(Arc::new(remote.clone()), Arc::new(DefaultClock));
        Self {
            remote,
            board,
            seed: Vec::new(),
            last_result: None,
        }
    }

    /// Replaces the remote store with one holding the seeded tasks.
    pub fn reseed(&mut self) {
        self.remote = InMemoryTaskRemote::with_tasks(self.seed.clone());
        self.board = BoardService::new(Arc::new(self.remote.clone()), Arc::new(DefaultClock));
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Builds a seed task from scenario values.
///
/// # Errors
///
/// Returns an error when the text is blank, the status is unknown or the
/// timestamp is out of range.
pub fn seed_task(id: &str, text: &str, status: &str, minute: i64) -> eyre::Result<Task> {
    let created_at = DateTime::<Utc>::from_timestamp(1_700_000_000 + minute * 60, 0)
        .ok_or_else(|| eyre::eyre!("minute {minute} is out of range"))?;
    Ok(Task::new(
        TaskId::from(id),
        TaskText::new(text)?,
        TaskStatus::try_from(status)?,
        created_at,
    ))
}

/// Parses a request kind named in a scenario.
///
/// # Errors
///
/// Returns an error for names that are not remote operations.
pub fn operation(name: &str) -> eyre::Result<RemoteOperation> {
    match name {
        "fetch" => Ok(RemoteOperation::FetchAll),
        "create" => Ok(RemoteOperation::Create),
        "delete" => Ok(RemoteOperation::Delete),
        "patch" => Ok(RemoteOperation::Patch),
        other => Err(eyre::eyre!("unknown request kind in scenario: {other}")),
    }
}
