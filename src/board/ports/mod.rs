//! Port contracts for the kanban board.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod remote;

#[cfg(test)]
pub use remote::MockTaskRemote;
pub use remote::{TaskRemote, TaskRemoteError, TaskRemoteResult};
