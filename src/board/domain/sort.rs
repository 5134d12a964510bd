//! Sort modes applied to lanes.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordering applied to the canonical collection before it is split into
/// lanes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Canonical (fetch and insert) order.
    #[default]
    Default,
    /// Oldest `createdAt` first.
    Ascending,
    /// Newest `createdAt` first.
    Descending,
}

impl SortMode {
    /// Returns the next mode in the cycle `default → ascending → descending`.
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::Default => Self::Ascending,
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Default,
        }
    }

    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }

    /// Returns the label shown on the sort toggle.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "Sort: default",
            Self::Ascending => "Sort: oldest first",
            Self::Descending => "Sort: newest first",
        }
    }
}

impl TryFrom<&str> for SortMode {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "default" => Ok(Self::Default),
            "ascending" | "asc" => Ok(Self::Ascending),
            "descending" | "desc" => Ok(Self::Descending),
            _ => Err(TaskDomainError::UnknownSortMode(value.to_owned())),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
