//! The process-wide wishlist of liked book ids.
//!
//! [`WishlistStore`] is the only writer of the durable wishlist value. Every
//! view shares one store (it is cheap to clone) and subscribes to changes
//! instead of keeping its own copy of the membership set.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use dashmap::DashMap;
use folio_types::{BookId, WishlistState};
use tokio::sync::{Mutex, watch};
use tracing::{debug, error, info, warn};

use crate::error::{StorageError, WishlistError};
use crate::notify::{Notification, NotificationSink, TracingSink};
use crate::traits::KeyValueStore;

/// Key under which the wishlist is persisted.
pub const WISHLIST_KEY: &str = "wishlist";

/// What a toggle did to the membership set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistEvent {
    Added,
    Removed,
}

impl WishlistEvent {
    pub fn message(self) -> &'static str {
        match self {
            WishlistEvent::Added => "Added to wishlist",
            WishlistEvent::Removed => "Removed from wishlist",
        }
    }
}

/// Result of a successful [`WishlistStore::toggle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub event: WishlistEvent,
    pub state: WishlistState,
    pub notification: Notification,
}

/// Delivered to subscribers after each persisted change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistChange {
    pub event: WishlistEvent,
    pub book_id: BookId,
    pub state: WishlistState,
}

/// Handle returned by [`WishlistStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Arc<dyn Fn(&WishlistChange) + Send + Sync>;

struct Inner {
    storage: Arc<dyn KeyValueStore>,
    sink: Arc<dyn NotificationSink>,
    current: watch::Sender<WishlistState>,
    // False until the durable value has been read successfully. A toggle
    // must not overwrite a value it never saw.
    hydrated: AtomicBool,
    // Serializes hydrate/toggle so the durable value always matches `current`.
    write_lock: Mutex<()>,
    subscribers: DashMap<SubscriptionId, Callback>,
    next_subscription: AtomicU64,
}

/// Shared, durable set of liked book ids.
#[derive(Clone)]
pub struct WishlistStore {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for WishlistStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WishlistStore")
            .field("state", &*self.inner.current.borrow())
            .field("subscribers", &self.inner.subscribers.len())
            .finish()
    }
}

impl WishlistStore {
    /// Create an empty store over `storage` that logs toggle notifications.
    /// Call [`WishlistStore::hydrate`] to load the persisted value.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_sink(storage, Arc::new(TracingSink))
    }

    /// Like [`WishlistStore::new`], delivering toggle notifications to `sink`.
    pub fn with_sink(storage: Arc<dyn KeyValueStore>, sink: Arc<dyn NotificationSink>) -> Self {
        let (current, _) = watch::channel(WishlistState::new());
        Self {
            inner: Arc::new(Inner {
                storage,
                sink,
                current,
                hydrated: AtomicBool::new(false),
                write_lock: Mutex::new(()),
                subscribers: DashMap::new(),
                next_subscription: AtomicU64::new(0),
            }),
        }
    }

    /// Create a store and hydrate it in one step.
    pub async fn open(storage: Arc<dyn KeyValueStore>) -> Self {
        let store = Self::new(storage);
        store.hydrate().await;
        store
    }

    /// Load membership from durable storage.
    ///
    /// A missing value or a value that is not a JSON array of book ids yields
    /// the empty set. An unreadable backend also yields the empty set, but the
    /// store stays unhydrated: the next toggle reads again before writing and
    /// fails rather than overwrite the durable value. This never fails.
    pub async fn hydrate(&self) -> WishlistState {
        let _guard = self.inner.write_lock.lock().await;

        let state = match self.read_durable().await {
            Ok(state) => {
                self.inner.hydrated.store(true, Ordering::Release);
                info!("Wishlist hydrated with {} books", state.len());
                state
            }
            Err(e) => {
                error!("Failed to read stored wishlist, starting empty: {}", e);
                WishlistState::new()
            }
        };

        self.inner.current.send_replace(state.clone());
        state
    }

    /// Whether the durable value has been read since this store was created.
    pub fn is_hydrated(&self) -> bool {
        self.inner.hydrated.load(Ordering::Acquire)
    }

    async fn read_durable(&self) -> Result<WishlistState, StorageError> {
        match self.inner.storage.get(WISHLIST_KEY).await? {
            Some(raw) => Ok(decode(&raw).unwrap_or_else(|e| {
                warn!("Discarding stored wishlist: {}", e);
                WishlistState::new()
            })),
            None => {
                debug!("No stored wishlist, starting empty");
                Ok(WishlistState::new())
            }
        }
    }

    pub fn is_member(&self, id: BookId) -> bool {
        self.inner.current.borrow().contains(id)
    }

    pub fn state(&self) -> WishlistState {
        self.inner.current.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.current.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.current.borrow().is_empty()
    }

    /// Add `id` if absent, remove it if present.
    ///
    /// The new membership is written to durable storage before it becomes
    /// visible through [`WishlistStore::is_member`], before subscribers run
    /// and before this returns. If the write fails nothing changes and no
    /// notification is emitted.
    ///
    /// When an earlier read of the durable value failed it is read again
    /// first; if that read fails too the toggle fails and storage is left
    /// untouched.
    pub async fn toggle(&self, id: BookId) -> Result<ToggleOutcome, WishlistError> {
        let _guard = self.inner.write_lock.lock().await;

        if !self.is_hydrated() {
            let state = self.read_durable().await?;
            info!("Wishlist recovered with {} books", state.len());
            self.inner.current.send_replace(state);
            self.inner.hydrated.store(true, Ordering::Release);
        }

        let mut next = self.inner.current.borrow().clone();
        let event = if next.remove(id) {
            WishlistEvent::Removed
        } else {
            next.insert(id);
            WishlistEvent::Added
        };

        let encoded = encode(&next)?;
        self.inner.storage.set(WISHLIST_KEY, &encoded).await?;
        self.inner.current.send_replace(next.clone());

        debug!("Wishlist {:?} book {}", event, id);

        let change = WishlistChange {
            event,
            book_id: id,
            state: next.clone(),
        };
        self.notify_subscribers(&change);

        let notification = Notification::success(event.message());
        self.inner.sink.notify(&notification);

        Ok(ToggleOutcome {
            event,
            state: next,
            notification,
        })
    }

    /// Register a callback that runs after every persisted toggle.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&WishlistChange) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.inner.subscribers.insert(id, Arc::new(callback));
        id
    }

    /// Returns `true` if the subscription existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.subscribers.remove(&id).is_some()
    }

    /// Async alternative to [`WishlistStore::subscribe`]: a receiver that
    /// always holds the latest membership.
    pub fn watch(&self) -> watch::Receiver<WishlistState> {
        self.inner.current.subscribe()
    }

    fn notify_subscribers(&self, change: &WishlistChange) {
        // Clone the callbacks out so a callback may (un)subscribe without
        // deadlocking on the map.
        let callbacks: Vec<Callback> = self
            .inner
            .subscribers
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        for callback in callbacks {
            callback(change);
        }
    }
}

/// Parse the durable representation of the wishlist.
pub fn decode(raw: &str) -> Result<WishlistState, WishlistError> {
    serde_json::from_str(raw).map_err(|e| WishlistError::Corrupted {
        message: format!("expected a JSON array of book ids, got {} bytes", raw.len()),
        source: Some(eyre::Report::new(e)),
    })
}

/// Produce the durable representation of the wishlist.
pub fn encode(state: &WishlistState) -> Result<String, WishlistError> {
    serde_json::to_string(state).map_err(|e| {
        WishlistError::Storage(StorageError::SerializationError {
            message: "Failed to serialize wishlist".to_string(),
            source: Some(eyre::Report::new(e)),
        })
    })
}
