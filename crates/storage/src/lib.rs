//! Durable storage and the wishlist store for Folio.
//!
//! This crate provides a trait-based key-value storage layer with filesystem
//! and in-memory backends, and the [`WishlistStore`] built on top of it.

pub mod backends;
pub mod error;
pub mod notify;
pub mod traits;
pub mod wishlist;

// Re-export the main interface and types for easy access
pub use backends::{FilesystemStore, MemoryStore};
pub use error::{Result, StorageError, WishlistError};
pub use notify::{Notification, NotificationKind, NotificationSink, TracingSink};
pub use traits::KeyValueStore;
pub use wishlist::{
    SubscriptionId, ToggleOutcome, WISHLIST_KEY, WishlistChange, WishlistEvent, WishlistStore,
};
