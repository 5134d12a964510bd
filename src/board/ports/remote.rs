//! Remote store port for the task collection resource.

use crate::board::domain::{NewTask, Task, TaskId, TaskPatch};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for remote task store operations.
pub type TaskRemoteResult<T> = Result<T, TaskRemoteError>;

/// CRUD contract against the remote task collection.
///
/// Each call issues exactly one request. Implementations never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRemote: Send + Sync {
    /// Fetches the whole collection in server order.
    async fn fetch_all(&self) -> TaskRemoteResult<Vec<Task>>;

    /// Creates a task and returns it with its server-assigned identifier.
    async fn create(&self, task: &NewTask) -> TaskRemoteResult<Task>;

    /// Deletes the task with the given identifier.
    async fn delete(&self, id: &TaskId) -> TaskRemoteResult<()>;

    /// Applies a partial update to the task with the given identifier.
    async fn patch(&self, id: &TaskId, patch: &TaskPatch) -> TaskRemoteResult<()>;
}

/// Errors returned by remote task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRemoteError {
    /// The request could not be delivered or no response arrived.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The server answered with a non-success status.
    #[error("remote store returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(Arc<dyn std::error::Error + Send + Sync>),

    /// The configured endpoint cannot address individual tasks.
    #[error("invalid collection endpoint: {0}")]
    InvalidEndpoint(String),
}

impl TaskRemoteError {
    /// Wraps a transport-level failure.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Wraps a response decoding failure.
    pub fn decode(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Decode(Arc::new(err))
    }
}
