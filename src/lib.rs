//! Taskboard: a client-side kanban task tracker core.
//!
//! Tasks live in a remote JSON collection. This crate keeps a canonical local
//! copy of that collection, derives three status lanes from it, and
//! reconciles the local copy after each confirmed remote mutation.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Tasks, the status state machine and lane derivation, with no
//!   infrastructure dependencies
//! - **Ports**: The remote task collection contract
//! - **Adapters**: HTTP and in-memory implementations of that contract
//! - **Services**: The canonical task store and the board orchestrator
//!
//! # Modules
//!
//! - [`board`]: Task synchronisation, categorisation and mutation
//! - [`config`]: Layered client configuration
//! - [`telemetry`]: Logging setup for binaries

pub mod board;
pub mod config;
pub mod telemetry;
