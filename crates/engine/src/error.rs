use std::sync::Arc;

use folio_types::{BookId, ErrorKind};

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while retrieving the remote catalog.
///
/// Every variant is a network failure from the caller's point of view; the
/// distinction only matters for logging and for deciding whether another
/// attempt is worthwhile.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The request never produced a response (DNS, connect, timeout, broken body).
    #[error("Catalog request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: Option<eyre::Report>,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("Catalog provider at {url} responded with status {status}")]
    Status { url: String, status: u16 },

    /// The response body could not be turned into a catalog snapshot.
    #[error("Malformed catalog payload: {message}")]
    MalformedPayload {
        message: String,
        #[source]
        source: Option<eyre::Report>,
    },
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::NetworkFailure
    }

    /// Whether repeating the same request could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            CatalogError::Transport { .. } => true,
            CatalogError::Status { status, .. } => *status == 429 || *status >= 500,
            CatalogError::MalformedPayload { .. } => false,
        }
    }
}

/// Errors raised by a detail lookup.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Book not found: {id}")]
    NotFound { id: BookId },

    #[error("Catalog is still loading")]
    Pending,

    #[error("Catalog is unavailable")]
    Unavailable {
        #[source]
        source: Arc<CatalogError>,
    },
}

impl LookupError {
    /// `None` while the catalog is still loading, which is not a failure.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            LookupError::NotFound { .. } => Some(ErrorKind::NotFound),
            LookupError::Pending => None,
            LookupError::Unavailable { source } => Some(source.kind()),
        }
    }
}
