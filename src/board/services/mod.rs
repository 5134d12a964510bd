//! Application services for board synchronisation.

mod board;
mod intent;
mod store;
mod view;

pub use board::{BoardError, BoardResult, BoardService};
pub use intent::{BoardIntent, Outcome, SkipReason};
pub use store::{TaskStore, TaskStoreError};
pub use view::BoardView;
