//! In-memory adapter for the remote task collection.

mod remote;

pub use remote::{InMemoryTaskRemote, RemoteOperation, RemoteRequest};
