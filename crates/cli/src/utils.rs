//! Wiring between the configuration and the engine/storage crates.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use folio_engine::{CatalogSnapshot, CatalogState, CatalogStore, HttpCatalogSource, RetryPolicy};
use folio_storage::{
    FilesystemStore, Notification, NotificationKind, NotificationSink, WishlistStore,
};
use url::Url;

use crate::config::Config;

/// Prints wishlist acknowledgments to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&self, notification: &Notification) {
        match notification.kind {
            NotificationKind::Success => println!("✅ {}", notification.message),
            NotificationKind::Error => eprintln!("❌ {}", notification.message),
        }
    }
}

/// Build the catalog store described by the `catalog.*` settings.
pub fn create_catalog_store(config: &Config) -> Result<CatalogStore> {
    let url = Url::parse(&config.catalog.url)
        .map_err(|e| eyre::eyre!("Invalid catalog URL '{}': {}", config.catalog.url, e))?;

    let source = if config.catalog.timeout_secs == 0 {
        HttpCatalogSource::new(url)
    } else {
        HttpCatalogSource::with_timeout(url, Duration::from_secs(config.catalog.timeout_secs))?
    };

    Ok(CatalogStore::new(Arc::new(source)).with_retry(retry_policy(config)))
}

pub fn retry_policy(config: &Config) -> RetryPolicy {
    if config.catalog.max_attempts <= 1 {
        RetryPolicy::none()
    } else {
        RetryPolicy::exponential(
            config.catalog.max_attempts,
            Duration::from_millis(config.catalog.backoff_ms),
        )
    }
}

/// Open the wishlist kept under `storage.path`, printing toggle results.
pub async fn open_wishlist(config: &Config) -> WishlistStore {
    let storage = FilesystemStore::new(PathBuf::from(&config.storage.path));
    tracing::debug!("Opening wishlist storage at {}", storage.root_path().display());

    let store = WishlistStore::with_sink(Arc::new(storage), Arc::new(ConsoleSink));
    store.hydrate().await;
    store
}

/// Load the catalog once and return whatever snapshot is usable.
///
/// A failed load still yields the stale snapshot when one exists; otherwise
/// the failure is reported to the user.
pub async fn load_catalog(catalog: &CatalogStore) -> Result<Arc<CatalogSnapshot>> {
    match catalog.load().await {
        CatalogState::Ready(snapshot) => Ok(snapshot),
        CatalogState::Failed {
            error,
            stale: Some(snapshot),
        } => {
            println!(
                "⚠️  Catalog refresh failed ({}), showing results fetched {}",
                error,
                snapshot.fetched_at().format("%Y-%m-%d %H:%M UTC")
            );
            Ok(snapshot)
        }
        CatalogState::Failed { error, stale: None } => Err(eyre::eyre!(
            "Could not load the catalog ({}): {}",
            error.kind(),
            error
        )),
        CatalogState::Loading => Err(eyre::eyre!("Catalog is still loading")),
    }
}
