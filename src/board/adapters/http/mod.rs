//! HTTP adapter for the remote task collection.

mod client;

pub use client::HttpTaskRemote;
