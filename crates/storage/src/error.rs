//! Error types for durable storage and the wishlist store.

use folio_types::ErrorKind;
use thiserror::Error;

/// Errors that can occur in a key-value storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid storage key: {key:?}")]
    InvalidKey { key: String },

    #[error("Storage operation failed: {operation}")]
    BackendError {
        operation: String,
        #[source]
        source: Option<eyre::Report>,
    },

    #[error("Serialization failed: {message}")]
    SerializationError {
        message: String,
        #[source]
        source: Option<eyre::Report>,
    },
}

/// Errors surfaced by the wishlist store.
#[derive(Debug, Error)]
pub enum WishlistError {
    /// The durable value exists but is not a collection of book ids.
    ///
    /// `hydrate` recovers from this locally; it is exposed so the decoding
    /// step can be tested and logged.
    #[error("Stored wishlist is corrupted: {message}")]
    Corrupted {
        message: String,
        #[source]
        source: Option<eyre::Report>,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl WishlistError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WishlistError::Corrupted { .. } => ErrorKind::StorageCorruption,
            WishlistError::Storage(_) => ErrorKind::Storage,
        }
    }
}

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
