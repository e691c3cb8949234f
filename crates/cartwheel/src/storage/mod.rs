//! Durable key-value storage for the serialized cart.
//!
//! The cart store writes its full serialized state through to one slot of a
//! [`CartStorage`] after every accepted mutation, and reads it back once at
//! construction. [`JsonFileStorage`] is the durable implementation;
//! [`MemoryStorage`] backs tests and ephemeral sessions.

mod file;
mod memory;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur reading or writing storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to encode the storage file.
    #[error("storage encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Keyed slots of serialized blobs.
///
/// Implementations must return on `get` exactly what the last `set` stored
/// under the same key, or `None` if nothing was ever stored.
#[async_trait]
pub trait CartStorage: Send + Sync {
    /// Fetch the blob stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
