//! Ownership of the remote catalog fetch and the resulting snapshot.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{CatalogError, Result};
use crate::snapshot::CatalogSnapshot;
use crate::source::CatalogSource;

/// Observable state of the catalog.
#[derive(Debug, Clone)]
pub enum CatalogState {
    /// A fetch is in flight and no result is available yet.
    Loading,
    /// The most recent fetch succeeded.
    Ready(Arc<CatalogSnapshot>),
    /// The most recent fetch failed. `stale` holds the last good snapshot, if any.
    Failed {
        error: Arc<CatalogError>,
        stale: Option<Arc<CatalogSnapshot>>,
    },
}

impl CatalogState {
    /// The snapshot consumers can render, current or stale.
    pub fn snapshot(&self) -> Option<&Arc<CatalogSnapshot>> {
        match self {
            CatalogState::Loading => None,
            CatalogState::Ready(snapshot) => Some(snapshot),
            CatalogState::Failed { stale, .. } => stale.as_ref(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, CatalogState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, CatalogState::Ready(_))
    }

    pub fn error(&self) -> Option<&Arc<CatalogError>> {
        match self {
            CatalogState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Bounded retry with exponential backoff for [`CatalogStore::load`].
///
/// The default performs a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }

    pub fn exponential(max_attempts: u32, initial_backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_backoff,
            max_backoff: initial_backoff.saturating_mul(8),
        }
    }

    /// Delay before attempt number `attempt + 1`, where `attempt` starts at 1.
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

/// Holds the single catalog snapshot shared by every view.
pub struct CatalogStore {
    source: Arc<dyn CatalogSource>,
    retry: RetryPolicy,
    state: watch::Sender<CatalogState>,
    last_ready: watch::Sender<Option<Arc<CatalogSnapshot>>>,
}

impl CatalogStore {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        let (state, _) = watch::channel(CatalogState::Loading);
        let (last_ready, _) = watch::channel(None);

        Self {
            source,
            retry: RetryPolicy::default(),
            state,
            last_ready,
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Current state. Never triggers a fetch.
    pub fn state(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    /// Newest successfully fetched snapshot, even while a reload is pending
    /// or after a reload failed.
    pub fn snapshot(&self) -> Option<Arc<CatalogSnapshot>> {
        self.last_ready.borrow().clone()
    }

    /// Receive every state transition from now on.
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    /// Fetch the catalog and publish the outcome.
    ///
    /// On failure any previously loaded snapshot is kept as `stale` rather
    /// than discarded.
    pub async fn load(&self) -> CatalogState {
        self.state.send_replace(CatalogState::Loading);
        info!("Loading catalog from {}", self.source.describe());

        let next = match self.fetch_with_retry().await {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                info!(
                    "Catalog ready: {} books ({} reported by provider)",
                    snapshot.len(),
                    snapshot.total_count()
                );
                self.last_ready.send_replace(Some(snapshot.clone()));
                CatalogState::Ready(snapshot)
            }
            Err(error) => {
                let stale = self.snapshot();
                warn!(
                    "Catalog load failed: {} (stale snapshot kept: {})",
                    error,
                    stale.is_some()
                );
                CatalogState::Failed {
                    error: Arc::new(error),
                    stale,
                }
            }
        };

        self.state.send_replace(next.clone());
        next
    }

    async fn fetch_with_retry(&self) -> Result<CatalogSnapshot> {
        let mut attempt = 1;
        loop {
            let result = self
                .source
                .fetch()
                .await
                .and_then(CatalogSnapshot::from_page);

            match result {
                Ok(snapshot) => return Ok(snapshot),
                Err(error) if attempt < self.retry.max_attempts && error.is_retryable() => {
                    let delay = self.retry.backoff_after(attempt);
                    debug!(
                        "Catalog fetch attempt {}/{} failed: {}; retrying in {:?}",
                        attempt, self.retry.max_attempts, error, delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
