#![forbid(unsafe_code)]

mod backend;
mod config;
mod store;
mod time;

pub use backend::{KvBackend, MemoryBackend, SqliteBackend, StorageError};
pub use config::*;
pub use store::*;
