use eyre::Result;
use folio_engine::{missing_from_snapshot, wishlisted};
use folio_storage::{Notification, NotificationSink};
use folio_types::BookId;

use crate::commands::browse::format_card;
use crate::config::Config;
use crate::utils::{ConsoleSink, create_catalog_store, load_catalog, open_wishlist};

pub async fn handle_like_command(id: BookId, config: &Config) -> Result<()> {
    let wishlist = open_wishlist(config).await;

    // The acknowledgment itself is printed by the console sink.
    if let Err(e) = wishlist.toggle(id).await {
        ConsoleSink.notify(&Notification::error(format!(
            "Could not update wishlist for book {}",
            id
        )));
        return Err(e.into());
    }

    Ok(())
}

pub async fn handle_wishlist_command(config: &Config) -> Result<()> {
    let wishlist = open_wishlist(config).await;
    let state = wishlist.state();

    if state.is_empty() {
        println!("💔 Your wishlist is empty");
        println!("💡 Add books with: folio like <id>");
        return Ok(());
    }

    let catalog = create_catalog_store(config)?;
    let snapshot = load_catalog(&catalog).await?;

    let books = wishlisted(&snapshot, &state);
    println!("♥ {} books on your wishlist", state.len());
    for book in books {
        println!("{}", format_card(book, true));
    }

    let missing = missing_from_snapshot(&snapshot, &state);
    if !missing.is_empty() {
        let ids: Vec<String> = missing.iter().map(ToString::to_string).collect();
        println!(
            "⚠️  {} not in the current catalog: {}",
            missing.len(),
            ids.join(", ")
        );
    }

    Ok(())
}
