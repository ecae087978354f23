//! Stateless filtering and pagination over a catalog snapshot.
//!
//! Nothing in this module mutates its inputs. Results borrow from the
//! snapshot, so every returned book is an element of that snapshot and
//! appears in snapshot order.

use std::collections::HashSet;
use std::num::NonZeroUsize;

use folio_types::{Book, BookId, WishlistState};

use crate::snapshot::CatalogSnapshot;

/// Page size used when the caller does not choose one.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::new(8).unwrap();

/// Parameters describing one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    /// Case-insensitive substring matched against titles. Empty matches all.
    pub search_term: String,
    /// Exact subject a book must carry. `None` disables the filter.
    pub genre: Option<String>,
    /// 1-indexed page number.
    pub page: NonZeroUsize,
    pub page_size: NonZeroUsize,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            genre: None,
            page: NonZeroUsize::MIN,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QuerySpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// An empty or blank genre means "all genres".
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        let genre = genre.into();
        self.genre = if genre.trim().is_empty() {
            None
        } else {
            Some(genre)
        };
        self
    }

    pub fn with_page(mut self, page: NonZeroUsize) -> Self {
        self.page = page;
        self
    }

    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Copy of this spec with `page` pulled back into `1..=total_pages`.
    ///
    /// The engine itself never clamps; this is for callers that want to
    /// reset a page cursor after a filter shrank the result set.
    pub fn clamped(&self, total_pages: usize) -> Self {
        let last = NonZeroUsize::new(total_pages).unwrap_or(NonZeroUsize::MIN);
        Self {
            page: self.page.min(last),
            ..self.clone()
        }
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPage<'a> {
    pub items: Vec<&'a Book>,
    /// Page that was requested, even when it lies past the end.
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    /// Number of books that passed the filters across all pages.
    pub total_matches: usize,
}

impl QueryPage<'_> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether the requested page lies beyond the last page of results.
    pub fn is_out_of_range(&self) -> bool {
        self.page > self.total_pages && self.total_pages > 0
    }
}

struct Predicate<'s> {
    needle: String,
    genre: Option<&'s str>,
}

impl<'s> Predicate<'s> {
    fn new(spec: &'s QuerySpec) -> Self {
        Self {
            needle: spec.search_term.to_lowercase(),
            genre: spec.genre.as_deref(),
        }
    }

    fn matches(&self, book: &Book) -> bool {
        let title_match = self.needle.is_empty() || book.title.to_lowercase().contains(&self.needle);
        let genre_match = self.genre.is_none_or(|genre| book.has_subject(genre));
        title_match && genre_match
    }
}

/// Filter and paginate `snapshot` according to `spec`.
///
/// A page past the end yields an empty `items` list rather than an error.
pub fn query<'a>(snapshot: &'a CatalogSnapshot, spec: &QuerySpec) -> QueryPage<'a> {
    let predicate = Predicate::new(spec);
    let matches: Vec<&Book> = snapshot
        .books()
        .iter()
        .filter(|book| predicate.matches(book))
        .collect();

    let page_size = spec.page_size.get();
    let total_matches = matches.len();
    let total_pages = total_matches.div_ceil(page_size);
    let offset = (spec.page.get() - 1).saturating_mul(page_size);

    let items = matches
        .into_iter()
        .skip(offset)
        .take(page_size)
        .collect();

    QueryPage {
        items,
        page: spec.page.get(),
        page_size,
        total_pages,
        total_matches,
    }
}

/// Every distinct subject in the snapshot, in order of first appearance.
pub fn available_genres(snapshot: &CatalogSnapshot) -> Vec<&str> {
    let mut seen = HashSet::new();
    snapshot
        .books()
        .iter()
        .flat_map(|book| book.subjects.iter())
        .map(String::as_str)
        .filter(|subject| seen.insert(*subject))
        .collect()
}

/// Books of the snapshot that are on the wishlist, in snapshot order.
///
/// Wishlisted ids that the snapshot does not contain are skipped; see
/// [`missing_from_snapshot`] to list them.
pub fn wishlisted<'a>(snapshot: &'a CatalogSnapshot, wishlist: &WishlistState) -> Vec<&'a Book> {
    snapshot
        .books()
        .iter()
        .filter(|book| wishlist.contains(book.id))
        .collect()
}

/// Wishlisted ids with no matching book in the snapshot.
pub fn missing_from_snapshot(
    snapshot: &CatalogSnapshot,
    wishlist: &WishlistState,
) -> Vec<BookId> {
    wishlist.iter().filter(|id| !snapshot.contains(*id)).collect()
}
