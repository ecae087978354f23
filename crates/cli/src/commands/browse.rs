use eyre::Result;
use folio_engine::{CatalogSnapshot, QueryPage, QuerySpec, available_genres, query};
use folio_storage::WishlistStore;
use folio_types::Book;
use tracing::debug;

use crate::cli::BrowseArgs;
use crate::config::Config;
use crate::utils::{create_catalog_store, load_catalog, open_wishlist};

pub async fn handle_browse_command(args: BrowseArgs, config: &Config) -> Result<()> {
    let catalog = create_catalog_store(config)?;
    let snapshot = load_catalog(&catalog).await?;
    let wishlist = open_wishlist(config).await;

    let spec = browse_spec(&args, config)?;
    debug!("Browsing with {:?}", spec);

    let mut page = query(&snapshot, &spec);
    if page.is_out_of_range() {
        let clamped = spec.clamped(page.total_pages);
        println!(
            "📄 Page {} is past the end, showing page {} of {}",
            page.page, clamped.page, page.total_pages
        );
        page = query(&snapshot, &clamped);
    }

    print_page(&snapshot, &page, &wishlist);
    Ok(())
}

pub async fn handle_genres_command(config: &Config) -> Result<()> {
    let catalog = create_catalog_store(config)?;
    let snapshot = load_catalog(&catalog).await?;

    let genres = available_genres(&snapshot);
    if genres.is_empty() {
        println!("No genres in the catalog");
        return Ok(());
    }

    println!("🏷️  {} genres:", genres.len());
    for genre in genres {
        println!("  {}", genre);
    }
    Ok(())
}

fn browse_spec(args: &BrowseArgs, config: &Config) -> Result<QuerySpec> {
    let page_size = match args.page_size {
        Some(size) => size,
        None => std::num::NonZeroUsize::new(config.browse.page_size)
            .ok_or_else(|| eyre::eyre!("browse.page_size must be at least 1"))?,
    };

    let mut spec = QuerySpec::new()
        .with_search(args.search.clone())
        .with_page(args.page)
        .with_page_size(page_size);
    if let Some(genre) = &args.genre {
        spec = spec.with_genre(genre.clone());
    }
    Ok(spec)
}

fn print_page(snapshot: &CatalogSnapshot, page: &QueryPage<'_>, wishlist: &WishlistStore) {
    if page.total_matches == 0 {
        println!("No books match these filters");
        return;
    }

    println!(
        "📚 {} matching books ({} in catalog, fetched {})",
        page.total_matches,
        snapshot.len(),
        snapshot.fetched_at().format("%Y-%m-%d %H:%M UTC")
    );
    for book in &page.items {
        println!("{}", format_card(book, wishlist.is_member(book.id)));
    }
    println!("{}", format_footer(page));
}

pub(crate) fn format_card(book: &Book, liked: bool) -> String {
    let marker = if liked { "♥" } else { " " };
    let authors = book.author_names();
    let mut line = format!("[{}] {:>6}  {}", marker, book.id.get(), book.title);
    if !authors.is_empty() {
        line.push_str(&format!(" by {}", authors));
    }
    if let Some(genre) = book.primary_genre() {
        line.push_str(&format!(" ({})", genre));
    }
    line
}

pub(crate) fn format_footer(page: &QueryPage<'_>) -> String {
    let mut footer = format!("Page {} of {}", page.page, page.total_pages);
    if page.has_previous() {
        footer.push_str(&format!("  < --page {}", page.page - 1));
    }
    if page.has_next() {
        footer.push_str(&format!("  > --page {}", page.page + 1));
    }
    footer
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_types::{Author, BookId};
    use std::num::NonZeroUsize;

    fn book(id: u64, title: &str, subjects: &[&str]) -> Book {
        Book {
            id: BookId(id),
            title: title.to_string(),
            authors: vec![Author {
                name: "Austen, Jane".to_string(),
                birth_year: Some(1775),
                death_year: Some(1817),
            }],
            subjects: subjects.iter().map(|s| s.to_string()).collect(),
            bookshelves: vec![],
            formats: Default::default(),
            download_count: 0,
        }
    }

    #[test]
    fn test_card_shows_marker_author_and_genre() {
        let b = book(1342, "Pride and Prejudice", &["Fiction"]);
        assert_eq!(
            format_card(&b, true),
            "[♥]   1342  Pride and Prejudice by Austen, Jane (Fiction)"
        );
        assert!(format_card(&b, false).starts_with("[ ]"));
    }

    #[test]
    fn test_footer_navigation() {
        let books: Vec<Book> = (1..=20).map(|i| book(i, "Title", &[])).collect();
        let snapshot = CatalogSnapshot::new(books).unwrap();
        let spec = QuerySpec::new().with_page(NonZeroUsize::new(2).unwrap());

        let page = query(&snapshot, &spec);

        assert_eq!(format_footer(&page), "Page 2 of 3  < --page 1  > --page 3");
    }

    #[test]
    fn test_browse_spec_uses_config_page_size() {
        let mut config = Config::default();
        config.set_value("browse.page_size", "3").unwrap();
        let args = BrowseArgs {
            search: "the".to_string(),
            genre: Some("Fiction".to_string()),
            page: NonZeroUsize::MIN,
            page_size: None,
        };

        let spec = browse_spec(&args, &config).unwrap();

        assert_eq!(spec.page_size.get(), 3);
        assert_eq!(spec.search_term, "the");
        assert_eq!(spec.genre.as_deref(), Some("Fiction"));
    }
}
