//! Task entity, its status lanes and the payloads sent to the remote store.

use super::{TaskDomainError, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status lane a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Work has not started.
    Todo,
    /// Work is under way.
    InProgress,
    /// Work is finished.
    Completed,
}

impl TaskStatus {
    /// All statuses in lane order, left to right.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Completed];

    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(TaskDomainError::UnknownStatus(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-empty task text, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskText(String);

impl TaskText {
    /// Creates validated task text.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyText`] when the value is empty after
    /// trimming.
    pub fn new(value: impl AsRef<str>) -> Result<Self, TaskDomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyText);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the text as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskText {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskText> for String {
    fn from(value: TaskText) -> Self {
        value.0
    }
}

impl AsRef<str> for TaskText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A task as held by the remote collection.
///
/// The view-only editing flag is not part of the entity; the board service
/// keeps it in a side table keyed by [`TaskId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    text: TaskText,
    status: TaskStatus,
    created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task from server-assigned fields.
    #[must_use]
    pub const fn new(
        id: TaskId,
        text: TaskText,
        status: TaskStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            text,
            status,
            created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the display text.
    #[must_use]
    pub const fn text(&self) -> &TaskText {
        &self.text
    }

    /// Returns the status lane.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp assigned by the server.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Merges the fields carried by `patch` into this task.
    ///
    /// The identifier and creation timestamp are never touched.
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(text) = patch.new_text() {
            self.text = text.clone();
        }
        if let Some(status) = patch.new_status() {
            self.status = status;
        }
    }
}

/// Payload for creating a task. Carries no identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    text: TaskText,
    status: TaskStatus,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates a `todo` task payload stamped with the proposed creation time.
    ///
    /// The timestamp the server echoes back is authoritative.
    #[must_use]
    pub const fn new(text: TaskText, created_at: DateTime<Utc>) -> Self {
        Self {
            text,
            status: TaskStatus::Todo,
            created_at,
        }
    }

    /// Returns the task text.
    #[must_use]
    pub const fn text(&self) -> &TaskText {
        &self.text
    }

    /// Returns the initial status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the proposed creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Materialises the payload as a stored task with the given identifier.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task::new(id, self.text, self.status, self.created_at)
    }
}

/// Partial update sent to the remote store.
///
/// A patch carries either the text or the status, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<TaskText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<TaskStatus>,
}

impl TaskPatch {
    /// Creates a patch that replaces the task text.
    #[must_use]
    pub const fn text(text: TaskText) -> Self {
        Self {
            text: Some(text),
            status: None,
        }
    }

    /// Creates a patch that moves the task to another lane.
    #[must_use]
    pub const fn status(status: TaskStatus) -> Self {
        Self {
            text: None,
            status: Some(status),
        }
    }

    /// Returns the replacement text, if any.
    #[must_use]
    pub const fn new_text(&self) -> Option<&TaskText> {
        self.text.as_ref()
    }

    /// Returns the target status, if any.
    #[must_use]
    pub const fn new_status(&self) -> Option<TaskStatus> {
        self.status
    }
}
