//! Shared data model for the Folio book catalog.
//!
//! These types mirror the JSON emitted by the remote catalog provider and are
//! used by both the catalog engine and the wishlist storage.

pub mod book;
pub mod error;
pub mod wishlist;

pub use book::{Author, Book, BookId, COVER_FORMAT, CatalogPage, ParseBookIdError};
pub use error::ErrorKind;
pub use wishlist::WishlistState;
