//! Catalog engine for Folio.
//!
//! This crate owns the remote catalog fetch ([`CatalogStore`]) and the pure
//! query functions that turn a [`CatalogSnapshot`] into displayable pages.

pub mod catalog;
pub mod error;
pub mod lookup;
pub mod query;
pub mod snapshot;
pub mod source;

pub use catalog::{CatalogState, CatalogStore, RetryPolicy};
pub use error::{CatalogError, LookupError, Result};
pub use lookup::{BookLookup, find_book_by_id};
pub use query::{
    DEFAULT_PAGE_SIZE, QueryPage, QuerySpec, available_genres, missing_from_snapshot, query,
    wishlisted,
};
pub use snapshot::CatalogSnapshot;
pub use source::{CatalogSource, DEFAULT_CATALOG_URL, HttpCatalogSource};
