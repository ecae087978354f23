use eyre::Result;
use folio_engine::{BookLookup, find_book_by_id};
use folio_types::{Author, Book, BookId};

use crate::config::Config;
use crate::utils::{create_catalog_store, open_wishlist};

pub async fn handle_show_command(id: BookId, config: &Config) -> Result<()> {
    let catalog = create_catalog_store(config)?;
    let state = catalog.load().await;

    match find_book_by_id(&state, id) {
        BookLookup::Found(book) => {
            let wishlist = open_wishlist(config).await;
            println!("{}", format_details(book, wishlist.is_member(book.id)));
        }
        BookLookup::NotFound(id) => {
            println!("❌ No book with id {} in the catalog", id);
        }
        BookLookup::Pending => {
            println!("⏳ Catalog is still loading, try again shortly");
        }
        BookLookup::Unavailable(error) => {
            return Err(eyre::eyre!(
                "Could not load the catalog ({}): {}",
                error.kind(),
                error
            ));
        }
    }

    Ok(())
}

fn format_author(author: &Author) -> String {
    match (author.birth_year, author.death_year) {
        (Some(born), Some(died)) => format!("{} ({}-{})", author.name, born, died),
        (Some(born), None) => format!("{} (b. {})", author.name, born),
        (None, Some(died)) => format!("{} (d. {})", author.name, died),
        (None, None) => author.name.clone(),
    }
}

fn format_list(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

pub(crate) fn format_details(book: &Book, liked: bool) -> String {
    let mut out = format!("📖 {} (#{})\n", book.title, book.id);

    let authors: Vec<String> = book.authors.iter().map(format_author).collect();
    out.push_str(&format!("  Authors:     {}\n", format_list(&authors)));
    out.push_str(&format!("  Subjects:    {}\n", format_list(&book.subjects)));
    out.push_str(&format!("  Bookshelves: {}\n", format_list(&book.bookshelves)));
    out.push_str(&format!("  Downloads:   {}\n", book.download_count));
    if let Some(cover) = book.cover_url() {
        out.push_str(&format!("  Cover:       {}\n", cover));
    }
    out.push_str(&format!(
        "  Wishlist:    {}",
        if liked { "♥ liked" } else { "not liked" }
    ));

    if !book.formats.is_empty() {
        out.push_str("\n  Formats:");
        for (mime, url) in &book.formats {
            out.push_str(&format!("\n    {}: {}", mime, url));
        }
    }

    out
}
