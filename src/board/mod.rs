//! Kanban board synchronisation for Taskboard.
//!
//! The board keeps a canonical in-memory collection of tasks in step with a
//! remote collection resource. Every lane shown to a user is derived from
//! that collection; nothing is mutated locally before the remote store
//! confirms it. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
