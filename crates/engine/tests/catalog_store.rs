//! Behaviour of the catalog store against a scripted catalog source.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use folio_engine::{
    BookLookup, CatalogError, CatalogSource, CatalogState, CatalogStore, QuerySpec, RetryPolicy,
    find_book_by_id, query,
};
use folio_types::{Book, BookId, CatalogPage};
use tokio::sync::Notify;

/// Replays a fixed sequence of fetch outcomes and counts the calls.
struct ScriptedSource {
    outcomes: Mutex<VecDeque<Result<CatalogPage, CatalogError>>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    fn new(outcomes: Vec<Result<CatalogPage, CatalogError>>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for ScriptedSource {
    async fn fetch(&self) -> Result<CatalogPage, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected extra fetch")
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

/// Answers the first fetch at once and holds every later fetch until released.
struct GatedSource {
    calls: AtomicUsize,
    release: Notify,
}

impl GatedSource {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            release: Notify::new(),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for GatedSource {
    async fn fetch(&self) -> Result<CatalogPage, CatalogError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) > 0 {
            self.release.notified().await;
        }
        Ok(page(&[(1, "Emma"), (2, "Persuasion")]))
    }

    fn describe(&self) -> String {
        "gated".to_string()
    }
}

fn page(titles: &[(u64, &str)]) -> CatalogPage {
    CatalogPage {
        count: titles.len() as u64,
        next: None,
        previous: None,
        results: titles
            .iter()
            .map(|(id, title)| Book {
                id: BookId(*id),
                title: title.to_string(),
                authors: vec![],
                subjects: vec![],
                bookshelves: vec![],
                formats: Default::default(),
                download_count: 0,
            })
            .collect(),
    }
}

fn server_error() -> CatalogError {
    CatalogError::Status {
        url: "https://gutendex.com/books".to_string(),
        status: 500,
    }
}

#[tokio::test]
async fn test_initial_state_is_loading() {
    let source = ScriptedSource::new(vec![]);
    let store = CatalogStore::new(source.clone());

    assert!(store.state().is_loading());
    assert!(store.snapshot().is_none());
    assert_eq!(source.calls(), 0, "construction must not fetch");
}

#[tokio::test]
async fn test_load_success_becomes_ready() {
    let source = ScriptedSource::new(vec![Ok(page(&[(1, "Emma"), (2, "Persuasion")]))]);
    let store = CatalogStore::new(source.clone());

    let state = store.load().await;

    assert!(state.is_ready());
    assert_eq!(store.snapshot().unwrap().len(), 2);
    assert_eq!(source.calls(), 1);

    let state = store.state();
    let snapshot = state.snapshot().unwrap();
    let results = query(snapshot, &QuerySpec::new().with_search("emma"));
    assert_eq!(results.items[0].id, BookId(1));
}

#[tokio::test]
async fn test_failed_reload_keeps_stale_snapshot() {
    let source = ScriptedSource::new(vec![Ok(page(&[(1, "Emma")])), Err(server_error())]);
    let store = CatalogStore::new(source.clone());

    store.load().await;
    let state = store.load().await;

    match &state {
        CatalogState::Failed { error, stale } => {
            assert!(matches!(**error, CatalogError::Status { status: 500, .. }));
            assert_eq!(stale.as_ref().unwrap().len(), 1);
        }
        other => panic!("expected failed state, got {:?}", other),
    }
    assert!(matches!(
        find_book_by_id(&state, BookId(1)),
        BookLookup::Found(_)
    ));
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_first_load_failure_has_no_snapshot() {
    let source = ScriptedSource::new(vec![Err(server_error())]);
    let store = CatalogStore::new(source);

    let state = store.load().await;

    assert!(state.snapshot().is_none());
    assert!(matches!(
        find_book_by_id(&state, BookId(1)),
        BookLookup::Unavailable(_)
    ));
}

#[tokio::test]
async fn test_default_policy_does_not_retry() {
    let source = ScriptedSource::new(vec![Err(server_error())]);
    let store = CatalogStore::new(source.clone());

    store.load().await;

    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_retry_recovers_from_transient_failure() {
    let source = ScriptedSource::new(vec![
        Err(server_error()),
        Err(server_error()),
        Ok(page(&[(1, "Emma")])),
    ]);
    let store = CatalogStore::new(source.clone())
        .with_retry(RetryPolicy::exponential(3, Duration::from_millis(1)));

    let state = store.load().await;

    assert!(state.is_ready());
    assert_eq!(source.calls(), 3);
}

#[tokio::test]
async fn test_retry_is_bounded() {
    let source = ScriptedSource::new(vec![
        Err(server_error()),
        Err(server_error()),
        Err(server_error()),
    ]);
    let store = CatalogStore::new(source.clone())
        .with_retry(RetryPolicy::exponential(3, Duration::from_millis(1)));

    let state = store.load().await;

    assert!(state.error().is_some());
    assert_eq!(source.calls(), 3);
}

#[tokio::test]
async fn test_malformed_payload_is_not_retried() {
    let duplicate_ids = page(&[(1, "Emma"), (1, "Emma again")]);
    let source = ScriptedSource::new(vec![Ok(duplicate_ids)]);
    let store = CatalogStore::new(source.clone())
        .with_retry(RetryPolicy::exponential(3, Duration::from_millis(1)));

    let state = store.load().await;

    assert!(matches!(
        state.error().map(|e| &**e),
        Some(CatalogError::MalformedPayload { .. })
    ));
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_subscribers_observe_final_state() {
    let source = ScriptedSource::new(vec![Ok(page(&[(3, "Dracula")]))]);
    let store = CatalogStore::new(source);
    let mut receiver = store.subscribe();

    store.load().await;

    receiver.changed().await.unwrap();
    assert!(receiver.borrow_and_update().is_ready());
}

#[tokio::test]
async fn test_pending_reload_is_loading_but_keeps_previous_snapshot() {
    let source = GatedSource::new();
    let store = Arc::new(CatalogStore::new(source.clone()));
    store.load().await;
    let previous = store.snapshot().unwrap();

    let reload = tokio::spawn({
        let store = store.clone();
        async move { store.load().await }
    });
    while source.calls() < 2 {
        tokio::task::yield_now().await;
    }

    assert!(store.state().is_loading());
    assert!(Arc::ptr_eq(&store.snapshot().unwrap(), &previous));
    assert!(matches!(
        find_book_by_id(&store.state(), BookId(1)),
        BookLookup::Pending
    ));

    source.release.notify_one();
    let state = reload.await.unwrap();

    assert!(state.is_ready());
    assert!(!Arc::ptr_eq(&store.snapshot().unwrap(), &previous));
    assert_eq!(source.calls(), 2);
}
