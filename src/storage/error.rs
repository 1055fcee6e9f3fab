//! Storage error types.

use thiserror::Error;

/// Errors raised by a key-value store. They never leave the storage
/// boundary: [`load_records`](super::load_records) and
/// [`save_records`](super::save_records) log and absorb them.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The write would exceed the store's capacity
    #[error("Storage quota exceeded: {needed} bytes needed, limit is {limit}")]
    QuotaExceeded { needed: usize, limit: usize },

    /// Serializing the record set failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),
}
