//! Filesystem-based storage backend implementation.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::validate_key;
use crate::error::{Result, StorageError};
use crate::traits::KeyValueStore;

/// Filesystem-based storage backend.
///
/// Every key is stored as its own JSON document under the root directory.
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
///
/// Directory structure:
/// ```text
/// storage_root/
/// +-- wishlist.json
/// +-- {key}.json
/// ```
#[derive(Debug, Clone)]
pub struct FilesystemStore {
    root_path: PathBuf,
}

impl FilesystemStore {
    /// Create a new filesystem storage backend.
    ///
    /// # Arguments
    /// * `root_path` - Path to the root storage directory
    pub fn new<P: AsRef<Path>>(root_path: P) -> Self {
        Self {
            root_path: root_path.as_ref().to_path_buf(),
        }
    }

    /// Create the root directory if it does not exist yet.
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.root_path)
            .await
            .map_err(|e| StorageError::BackendError {
                operation: format!("create directory {}", self.root_path.display()),
                source: Some(eyre::eyre!("Failed to create storage directory: {}", e)),
            })
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn get_value_file(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root_path.join(format!("{}.json", key)))
    }

    fn get_temp_file(&self, key: &str) -> PathBuf {
        self.root_path.join(format!(".{}.json.tmp", key))
    }
}

#[async_trait]
impl KeyValueStore for FilesystemStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.get_value_file(key)?;

        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::BackendError {
                operation: format!("read {}", path.display()),
                source: Some(eyre::eyre!("Failed to read value file: {}", e)),
            }),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.get_value_file(key)?;
        let temp_path = self.get_temp_file(key);

        self.initialize().await?;

        fs::write(&temp_path, value)
            .await
            .map_err(|e| StorageError::BackendError {
                operation: format!("write {}", temp_path.display()),
                source: Some(eyre::eyre!("Failed to write value file: {}", e)),
            })?;

        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| StorageError::BackendError {
                operation: format!("replace {}", path.display()),
                source: Some(eyre::eyre!("Failed to move value file into place: {}", e)),
            })?;

        tracing::debug!("Stored {} bytes under key '{}'", value.len(), key);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        let path = self.get_value_file(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::BackendError {
                operation: format!("remove {}", path.display()),
                source: Some(eyre::eyre!("Failed to delete value file: {}", e)),
            }),
        }
    }
}
