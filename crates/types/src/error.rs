//! Error classification shared by the catalog and wishlist crates.

use std::fmt;

/// Coarse category of a failure, independent of which component raised it.
///
/// Presentation code branches on this instead of on concrete error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The catalog could not be fetched or decoded.
    NetworkFailure,
    /// A detail lookup targeted an id absent from a ready catalog.
    NotFound,
    /// The durable wishlist value is present but unreadable.
    StorageCorruption,
    /// The durable storage medium itself failed.
    Storage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NetworkFailure => write!(f, "network failure"),
            ErrorKind::NotFound => write!(f, "not found"),
            ErrorKind::StorageCorruption => write!(f, "storage corruption"),
            ErrorKind::Storage => write!(f, "storage failure"),
        }
    }
}
