//! In-memory remote task store for tests and local demos.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::board::{
    domain::{NewTask, Task, TaskId, TaskPatch},
    ports::{TaskRemote, TaskRemoteError, TaskRemoteResult},
};

/// Remote operation kinds, used to inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOperation {
    /// `fetch_all`.
    FetchAll,
    /// `create`.
    Create,
    /// `delete`.
    Delete,
    /// `patch`.
    Patch,
}

/// A request received by the in-memory store, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteRequest {
    /// Full collection fetch.
    FetchAll,
    /// Task creation with its payload.
    Create(NewTask),
    /// Deletion of a task.
    Delete(TaskId),
    /// Partial update of a task.
    Patch(TaskId, TaskPatch),
}

impl RemoteRequest {
    /// Returns the operation kind of this request.
    #[must_use]
    pub const fn operation(&self) -> RemoteOperation {
        match self {
            Self::FetchAll => RemoteOperation::FetchAll,
            Self::Create(_) => RemoteOperation::Create,
            Self::Delete(_) => RemoteOperation::Delete,
            Self::Patch(..) => RemoteOperation::Patch,
        }
    }
}

/// Thread-safe in-memory task collection.
///
/// Behaves like a JSON collection server: identifiers are assigned on
/// create, patches merge fields, and unknown identifiers yield a 404 status
/// error. Every request is recorded, including the ones made to fail.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRemote {
    state: Arc<RwLock<InMemoryRemoteState>>,
}

#[derive(Debug, Default)]
struct InMemoryRemoteState {
    tasks: Vec<Task>,
    requests: Vec<RemoteRequest>,
    failing: HashSet<RemoteOperation>,
}

const NOT_FOUND: u16 = 404;

impl InMemoryTaskRemote {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `tasks`.
    #[must_use]
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryRemoteState {
                tasks: tasks.into_iter().collect(),
                ..InMemoryRemoteState::default()
            })),
        }
    }

    /// Makes every subsequent `operation` fail with a transport error until
    /// [`Self::recover`] is called.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the state lock is poisoned.
    pub fn fail(&self, operation: RemoteOperation) -> TaskRemoteResult<()> {
        self.write()?.failing.insert(operation);
        Ok(())
    }

    /// Stops injecting failures for `operation`.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the state lock is poisoned.
    pub fn recover(&self, operation: RemoteOperation) -> TaskRemoteResult<()> {
        self.write()?.failing.remove(&operation);
        Ok(())
    }

    /// Returns a snapshot of the stored collection.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the state lock is poisoned.
    pub fn tasks(&self) -> TaskRemoteResult<Vec<Task>> {
        Ok(self.read()?.tasks.clone())
    }

    /// Returns every request received so far.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the state lock is poisoned.
    pub fn requests(&self) -> TaskRemoteResult<Vec<RemoteRequest>> {
        Ok(self.read()?.requests.clone())
    }

    /// Returns how many requests of `operation` were received.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the state lock is poisoned.
    pub fn count(&self, operation: RemoteOperation) -> TaskRemoteResult<usize> {
        Ok(self
            .read()?
            .requests
            .iter()
            .filter(|request| request.operation() == operation)
            .count())
    }

    fn read(&self) -> TaskRemoteResult<RwLockReadGuard<'_, InMemoryRemoteState>> {
        self.state
            .read()
            .map_err(|err| TaskRemoteError::transport(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TaskRemoteResult<RwLockWriteGuard<'_, InMemoryRemoteState>> {
        self.state
            .write()
            .map_err(|err| TaskRemoteError::transport(std::io::Error::other(err.to_string())))
    }

    /// Records `request` and reports whether it must fail.
    fn receive(
        &self,
        request: RemoteRequest,
    ) -> TaskRemoteResult<RwLockWriteGuard<'_, InMemoryRemoteState>> {
        let operation = request.operation();
        let mut state = self.write()?;
        state.requests.push(request);
        if state.failing.contains(&operation) {
            return Err(TaskRemoteError::transport(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                format!("injected {operation:?} failure"),
            )));
        }
        Ok(state)
    }
}

fn not_found(id: &TaskId) -> TaskRemoteError {
    TaskRemoteError::Status {
        status: NOT_FOUND,
        body: format!("task {id} not found"),
    }
}

#[async_trait]
impl TaskRemote for InMemoryTaskRemote {
    async fn fetch_all(&self) -> TaskRemoteResult<Vec<Task>> {
        let state = self.receive(RemoteRequest::FetchAll)?;
        Ok(state.tasks.clone())
    }

    async fn create(&self, task: &NewTask) -> TaskRemoteResult<Task> {
        let mut state = self.receive(RemoteRequest::Create(task.clone()))?;
        let created = task.clone().into_task(TaskId::generate());
        state.tasks.push(created.clone());
        Ok(created)
    }

    async fn delete(&self, id: &TaskId) -> TaskRemoteResult<()> {
        let mut state = self.receive(RemoteRequest::Delete(id.clone()))?;
        let position = state
            .tasks
            .iter()
            .position(|task| task.id() == id)
            .ok_or_else(|| not_found(id))?;
        state.tasks.remove(position);
        Ok(())
    }

    async fn patch(&self, id: &TaskId, patch: &TaskPatch) -> TaskRemoteResult<()> {
        let mut state = self.receive(RemoteRequest::Patch(id.clone(), patch.clone()))?;
        let task = state
            .tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or_else(|| not_found(id))?;
        task.apply(patch);
        Ok(())
    }
}
