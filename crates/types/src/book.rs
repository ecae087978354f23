//! Book records as delivered by the catalog provider.

use std::collections::BTreeMap;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// MIME type under which the provider publishes a book's cover image.
pub const COVER_FORMAT: &str = "image/jpeg";

/// Identity of a book within the catalog.
///
/// Ids are stable across fetches and are the only key used for wishlist
/// membership and detail lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub u64);

impl BookId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BookId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Error returned when a route or command argument is not a valid book id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid book id '{input}': {source}")]
pub struct ParseBookIdError {
    input: String,
    #[source]
    source: ParseIntError,
}

impl FromStr for BookId {
    type Err = ParseBookIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(BookId)
            .map_err(|source| ParseBookIdError {
                input: s.to_string(),
                source,
            })
    }
}

/// A person credited as an author of a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub birth_year: Option<i32>,
    #[serde(default)]
    pub death_year: Option<i32>,
}

/// One catalog entry.
///
/// Fields the provider sends that the catalog does not use (languages,
/// summaries, translators, ...) are ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<Author>,
    /// Genre/subject tags in provider order.
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub bookshelves: Vec<String>,
    /// Download URL keyed by MIME type.
    #[serde(default)]
    pub formats: BTreeMap<String, String>,
    #[serde(default)]
    pub download_count: u64,
}

impl Book {
    /// URL of the cover image, if the provider has one.
    pub fn cover_url(&self) -> Option<&str> {
        self.formats.get(COVER_FORMAT).map(String::as_str)
    }

    /// The subject shown as the book's genre in listings.
    pub fn primary_genre(&self) -> Option<&str> {
        self.subjects.first().map(String::as_str)
    }

    /// Exact-match membership test against the subject tags.
    pub fn has_subject(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }

    pub fn author_names(&self) -> String {
        self.authors
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Response envelope of the catalog listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<Book>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUTENDEX_ENTRY: &str = r#"{
        "id": 84,
        "title": "Frankenstein; Or, The Modern Prometheus",
        "authors": [{"name": "Shelley, Mary Wollstonecraft", "birth_year": 1797, "death_year": 1851}],
        "summaries": ["A gothic novel."],
        "translators": [],
        "subjects": ["Frankenstein's monster (Fictitious character) -- Fiction", "Gothic fiction"],
        "bookshelves": ["Gothic Fiction", "Movie Books"],
        "languages": ["en"],
        "copyright": false,
        "media_type": "Text",
        "formats": {
            "text/html": "https://www.gutenberg.org/ebooks/84.html.images",
            "image/jpeg": "https://www.gutenberg.org/cache/epub/84/pg84.cover.medium.jpg"
        },
        "download_count": 104321
    }"#;

    #[test]
    fn test_deserialize_provider_entry() {
        let book: Book = serde_json::from_str(GUTENDEX_ENTRY).unwrap();

        assert_eq!(book.id, BookId(84));
        assert_eq!(book.authors[0].birth_year, Some(1797));
        assert_eq!(book.subjects.len(), 2);
        assert_eq!(book.download_count, 104321);
        assert_eq!(
            book.cover_url(),
            Some("https://www.gutenberg.org/cache/epub/84/pg84.cover.medium.jpg")
        );
        assert_eq!(
            book.primary_genre(),
            Some("Frankenstein's monster (Fictitious character) -- Fiction")
        );
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let book: Book = serde_json::from_str(r#"{"id": 7, "title": "Bare"}"#).unwrap();

        assert!(book.authors.is_empty());
        assert!(book.subjects.is_empty());
        assert!(book.cover_url().is_none());
        assert!(book.primary_genre().is_none());
        assert_eq!(book.author_names(), "");
    }

    #[test]
    fn test_author_with_unknown_years() {
        let author: Author =
            serde_json::from_str(r#"{"name": "Homer", "birth_year": -750, "death_year": null}"#)
                .unwrap();

        assert_eq!(author.birth_year, Some(-750));
        assert_eq!(author.death_year, None);
    }

    #[test]
    fn test_book_id_from_route_segment() {
        assert_eq!(" 1342 ".parse::<BookId>().unwrap(), BookId(1342));
        assert!("abc".parse::<BookId>().is_err());
        assert!("-4".parse::<BookId>().is_err());
        assert!("".parse::<BookId>().is_err());
    }

    #[test]
    fn test_parse_error_names_input_and_keeps_cause() {
        use std::error::Error;

        let err = "12x".parse::<BookId>().unwrap_err();

        assert!(err.to_string().starts_with("invalid book id '12x': "));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_catalog_page_envelope() {
        let page: CatalogPage = serde_json::from_str(
            r#"{"count": 2, "next": "https://gutendex.com/books/?page=2", "previous": null,
                "results": [{"id": 1, "title": "A"}, {"id": 2, "title": "B"}]}"#,
        )
        .unwrap();

        assert_eq!(page.count, 2);
        assert!(page.previous.is_none());
        assert_eq!(page.results.len(), 2);
    }

    #[test]
    fn test_has_subject_is_exact() {
        let book = Book {
            id: BookId(1),
            title: "T".to_string(),
            authors: vec![],
            subjects: vec!["Drama".to_string()],
            bookshelves: vec![],
            formats: BTreeMap::new(),
            download_count: 0,
        };

        assert!(book.has_subject("Drama"));
        assert!(!book.has_subject("drama"));
        assert!(!book.has_subject("Dram"));
    }
}
