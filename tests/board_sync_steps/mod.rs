//! Step definitions for board synchronisation BDD scenarios.

pub mod world;

mod then;
mod when;
