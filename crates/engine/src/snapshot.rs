//! Immutable point-in-time copy of the catalog.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::{DateTime, Utc};
use folio_types::{Book, BookId, CatalogPage};

use crate::error::{CatalogError, Result};

/// An ordered, immutable set of books produced by one successful fetch.
///
/// A snapshot is never mutated after construction. Reloading the catalog
/// produces a new snapshot that replaces the previous one wholesale.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    books: Vec<Book>,
    index: HashMap<BookId, usize>,
    total_count: u64,
    fetched_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    /// Build a snapshot from books in provider order.
    ///
    /// Fails with [`CatalogError::MalformedPayload`] if two books share an id.
    pub fn new(books: Vec<Book>) -> Result<Self> {
        let total_count = books.len() as u64;
        Self::build(books, total_count)
    }

    /// Build a snapshot from the provider's response envelope.
    pub fn from_page(page: CatalogPage) -> Result<Self> {
        Self::build(page.results, page.count)
    }

    fn build(books: Vec<Book>, total_count: u64) -> Result<Self> {
        let mut index = HashMap::with_capacity(books.len());
        for (position, book) in books.iter().enumerate() {
            match index.entry(book.id) {
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
                Entry::Occupied(_) => {
                    return Err(CatalogError::MalformedPayload {
                        message: format!("duplicate book id {}", book.id),
                        source: None,
                    });
                }
            }
        }

        Ok(Self {
            books,
            index,
            total_count,
            fetched_at: Utc::now(),
        })
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.index.get(&id).map(|&position| &self.books[position])
    }

    pub fn contains(&self, id: BookId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of books the provider reports for the whole listing, which can
    /// exceed the number of books held when the provider pages its results.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }
}
