//! Detail lookup of a single book by id.

use std::sync::Arc;

use folio_types::{Book, BookId};

use crate::catalog::CatalogState;
use crate::error::{CatalogError, LookupError};

/// Outcome of looking a book up in the current catalog state.
#[derive(Debug, Clone)]
pub enum BookLookup<'a> {
    /// The catalog has not finished loading; render a loading indicator.
    Pending,
    Found(&'a Book),
    /// The catalog is available and does not contain the id.
    NotFound(BookId),
    /// The catalog failed to load and there is no earlier snapshot to search.
    Unavailable(Arc<CatalogError>),
}

impl<'a> BookLookup<'a> {
    pub fn into_result(self) -> Result<&'a Book, LookupError> {
        match self {
            BookLookup::Found(book) => Ok(book),
            BookLookup::Pending => Err(LookupError::Pending),
            BookLookup::NotFound(id) => Err(LookupError::NotFound { id }),
            BookLookup::Unavailable(source) => Err(LookupError::Unavailable { source }),
        }
    }
}

/// Find a book by id, distinguishing "still loading" from "absent".
///
/// After a failed reload the stale snapshot is searched.
pub fn find_book_by_id(state: &CatalogState, id: BookId) -> BookLookup<'_> {
    match state {
        CatalogState::Loading => BookLookup::Pending,
        CatalogState::Ready(snapshot) | CatalogState::Failed { stale: Some(snapshot), .. } => {
            snapshot
                .get(id)
                .map_or(BookLookup::NotFound(id), BookLookup::Found)
        }
        CatalogState::Failed { error, stale: None } => BookLookup::Unavailable(error.clone()),
    }
}
