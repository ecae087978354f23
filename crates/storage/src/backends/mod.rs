//! Backend implementations for durable key-value storage.
//!
//! `FilesystemStore` persists across restarts; `MemoryStore` is an
//! in-process stand-in for tests and throwaway sessions.

pub mod filesystem;
pub mod memory;

pub use filesystem::FilesystemStore;
pub use memory::MemoryStore;

use crate::error::{Result, StorageError};

/// Reject keys that are not safe to use as a file name.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey {
            key: key.to_string(),
        })
    }
}
