//! Trait definitions for durable storage.

use async_trait::async_trait;

use crate::error::Result;

/// A string key-value medium that outlives the process.
///
/// Keys are limited to ASCII letters, digits, `-` and `_` so that every
/// backend can map them to file names or column values without escaping.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`.
    ///
    /// # Returns
    /// `Some(value)` if present, `None` if the key was never set or was removed
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key.
    ///
    /// # Returns
    /// `true` if a value was removed, `false` if it didn't exist
    async fn remove(&self, key: &str) -> Result<bool>;
}
