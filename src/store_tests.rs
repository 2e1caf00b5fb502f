//! Tests for the card store.

use super::*;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Notify;

fn card(title: &str) -> ExploreCard {
    ExploreCard {
        title: title.to_string(),
        background_image: format!("http://example.com/{}.jpg", title.to_lowercase()),
        top_description: None,
        bottom_description: None,
        promo_message: None,
        content: None,
    }
}

fn cards(titles: &[&str]) -> Vec<ExploreCard> {
    titles.iter().map(|t| card(t)).collect()
}

/// Scripted service: answers fetches from a queue, records image requests
#[derive(Default)]
struct MockService {
    responses: Mutex<VecDeque<FetchOutcome>>,
    fetches: AtomicUsize,
    image_requests: Mutex<Vec<String>>,
    gate: Option<Arc<Notify>>,
    /// Number of leading fetches that panic instead of answering
    panics: AtomicUsize,
}

impl MockService {
    fn answering(responses: Vec<FetchOutcome>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    fn gated(responses: Vec<FetchOutcome>, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::answering(responses)
        }
    }

    fn panicking_once(responses: Vec<FetchOutcome>) -> Self {
        Self {
            panics: AtomicUsize::new(1),
            ..Self::answering(responses)
        }
    }

    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl ExploreService for MockService {
    async fn fetch_explore_data(&self) -> ExploreResult<Vec<ExploreCard>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let panics = self.panics.load(Ordering::SeqCst);
        if panics > 0 {
            self.panics.store(panics - 1, Ordering::SeqCst);
            panic!("feed exploded");
        }
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or(Err(ExploreCardError::InvalidUrl))
    }

    async fn load_image(&self, url: &str) -> Option<ImageData> {
        self.image_requests.lock().unwrap().push(url.to_string());
        None
    }
}

#[derive(Default)]
struct RecordingObserver {
    loaded: AtomicUsize,
    failures: Mutex<Vec<String>>,
}

impl RecordingObserver {
    fn loaded(&self) -> usize {
        self.loaded.load(Ordering::SeqCst)
    }

    fn failures(&self) -> Vec<String> {
        self.failures.lock().unwrap().clone()
    }
}

impl ExploreCardObserver for RecordingObserver {
    fn did_load_cards(&self) {
        self.loaded.fetch_add(1, Ordering::SeqCst);
    }

    fn did_fail_loading_cards(&self, error: &ExploreCardError) {
        self.failures.lock().unwrap().push(error.kind().to_string());
    }
}

fn store_with(service: MockService) -> (ExploreCardStore<MockService>, Arc<RecordingObserver>) {
    let mut store = ExploreCardStore::new(Arc::new(service), Handle::current());
    let observer = Arc::new(RecordingObserver::default());
    store.set_observer(&observer);
    (store, observer)
}

// ── initial state ────────────────────────────────────────────────────

#[tokio::test]
async fn new_store_is_empty_and_idle() {
    let (store, observer) = store_with(MockService::default());

    assert_eq!(store.number_of_cards(), 0);
    assert!(store.is_empty());
    assert!(!store.is_loading());
    assert!(store.card_at(0).is_none());
    assert_eq!(observer.loaded(), 0);
}

// ── loading ──────────────────────────────────────────────────────────

#[tokio::test]
async fn successful_load_publishes_cards_and_notifies_once() {
    let (mut store, observer) = store_with(MockService::answering(vec![Ok(cards(&[
        "Tops", "Denim", "Shorts",
    ]))]));

    store.load_cards();
    assert!(store.is_loading());
    store.settle().await;

    assert!(!store.is_loading());
    assert_eq!(store.number_of_cards(), 3);
    assert_eq!(observer.loaded(), 1);
    assert!(observer.failures().is_empty());
}

#[tokio::test]
async fn failed_load_notifies_once_and_keeps_list_empty() {
    let (mut store, observer) = store_with(MockService::answering(vec![Err(
        ExploreCardError::InvalidStatusCode(reqwest::StatusCode::INTERNAL_SERVER_ERROR),
    )]));

    store.load_cards();
    store.settle().await;

    assert!(!store.is_loading());
    assert_eq!(store.number_of_cards(), 0);
    assert_eq!(observer.loaded(), 0);
    assert_eq!(observer.failures(), vec!["bad_status".to_string()]);
}

#[tokio::test]
async fn failed_reload_keeps_previous_cards() {
    let (mut store, observer) = store_with(MockService::answering(vec![
        Ok(cards(&["Tops", "Denim"])),
        Err(ExploreCardError::InvalidUrl),
    ]));

    store.load_cards();
    store.settle().await;
    let before = store.cards().to_vec();

    store.load_cards();
    store.settle().await;

    assert_eq!(store.cards(), before.as_slice());
    assert_eq!(store.number_of_cards(), 2);
    assert_eq!(observer.loaded(), 1);
    assert_eq!(observer.failures().len(), 1);
}

#[tokio::test]
async fn successful_reload_replaces_list_wholesale() {
    let (mut store, observer) = store_with(MockService::answering(vec![
        Ok(cards(&["Tops", "Denim", "Shorts"])),
        Ok(cards(&["Outerwear"])),
    ]));

    store.load_cards();
    store.settle().await;
    store.load_cards();
    store.settle().await;

    assert_eq!(store.number_of_cards(), 1);
    assert_eq!(store.card_at(0).unwrap().title, "Outerwear");
    assert_eq!(observer.loaded(), 2);
}

#[tokio::test]
async fn retry_after_failure_loads_cards() {
    let (mut store, observer) = store_with(MockService::answering(vec![
        Err(ExploreCardError::InvalidUrl),
        Ok(cards(&["Tops"])),
    ]));

    store.load_cards();
    store.settle().await;
    assert!(store.is_empty());

    store.load_cards();
    store.settle().await;

    assert_eq!(store.number_of_cards(), 1);
    assert_eq!(observer.failures().len(), 1);
    assert_eq!(observer.loaded(), 1);
}

// ── single flight ────────────────────────────────────────────────────

#[tokio::test]
async fn load_while_loading_is_ignored() {
    let gate = Arc::new(Notify::new());
    let (mut store, observer) = store_with(MockService::gated(
        vec![Ok(cards(&["Tops"])), Ok(cards(&["Denim"]))],
        Arc::clone(&gate),
    ));

    store.load_cards();
    // Let the fetch task start and park on the gate
    tokio::task::yield_now().await;
    assert_eq!(store.service().fetches(), 1);

    store.load_cards();
    store.load_cards();
    tokio::task::yield_now().await;

    assert!(store.is_loading());
    assert_eq!(store.service().fetches(), 1);
    assert_eq!(store.process_events(), 0);

    gate.notify_one();
    store.settle().await;

    assert!(!store.is_loading());
    assert_eq!(store.service().fetches(), 1);
    assert_eq!(store.card_at(0).unwrap().title, "Tops");
    assert_eq!(observer.loaded(), 1);
}

#[tokio::test]
async fn process_events_applies_completed_fetch() {
    let (mut store, observer) = store_with(MockService::answering(vec![Ok(cards(&["Tops"]))]));

    store.load_cards();
    let mut applied = 0;
    for _ in 0..10 {
        tokio::task::yield_now().await;
        applied = store.process_events();
        if applied > 0 {
            break;
        }
    }

    assert_eq!(applied, 1);
    assert_eq!(store.number_of_cards(), 1);
    assert_eq!(observer.loaded(), 1);
}

#[tokio::test]
async fn settle_without_load_returns_immediately() {
    let (mut store, observer) = store_with(MockService::default());

    store.settle().await;

    assert_eq!(store.service().fetches(), 0);
    assert_eq!(observer.loaded(), 0);
    assert!(observer.failures().is_empty());
}

#[tokio::test]
async fn panicked_fetch_reports_failure_and_allows_retry() {
    let (mut store, observer) =
        store_with(MockService::panicking_once(vec![Ok(cards(&["Tops"]))]));

    store.load_cards();
    store.settle().await;

    assert!(!store.is_loading());
    assert_eq!(observer.failures(), vec!["interrupted".to_string()]);

    store.load_cards();
    store.settle().await;

    assert_eq!(store.service().fetches(), 2);
    assert_eq!(store.number_of_cards(), 1);
    assert_eq!(observer.loaded(), 1);
}

#[tokio::test]
async fn process_events_notices_panicked_fetch() {
    let (mut store, observer) = store_with(MockService::panicking_once(Vec::new()));

    store.load_cards();
    let mut applied = 0;
    for _ in 0..10 {
        tokio::task::yield_now().await;
        applied = store.process_events();
        if applied > 0 {
            break;
        }
    }

    assert_eq!(applied, 1);
    assert!(!store.is_loading());
    assert_eq!(observer.failures(), vec!["interrupted".to_string()]);
}

// ── observer ownership ───────────────────────────────────────────────

#[tokio::test]
async fn store_does_not_keep_observer_alive() {
    let (mut store, observer) = store_with(MockService::answering(vec![Ok(cards(&["Tops"]))]));
    let weak = Arc::downgrade(&observer);
    drop(observer);
    assert!(weak.upgrade().is_none());

    store.load_cards();
    store.settle().await;

    assert_eq!(store.number_of_cards(), 1);
}

#[tokio::test]
async fn cleared_observer_is_not_notified() {
    let (mut store, observer) = store_with(MockService::answering(vec![Ok(cards(&["Tops"]))]));
    store.clear_observer();

    store.load_cards();
    store.settle().await;

    assert_eq!(observer.loaded(), 0);
}

// ── lookup ───────────────────────────────────────────────────────────

#[tokio::test]
async fn card_at_matches_loaded_list() {
    let loaded = cards(&["Tops", "Denim", "Shorts", "Outerwear"]);
    let (mut store, _observer) = store_with(MockService::answering(vec![Ok(loaded.clone())]));

    store.load_cards();
    store.settle().await;

    for (i, expected) in loaded.iter().enumerate() {
        assert_eq!(store.card_at(i as isize), Some(expected));
    }
    assert!(store.card_at(-1).is_none());
    assert!(store.card_at(loaded.len() as isize).is_none());
    assert!(store.card_at(loaded.len() as isize + 100).is_none());
    assert!(store.card_at(isize::MIN).is_none());
    assert_eq!(store.card(3), Some(&loaded[3]));
    assert!(store.card(usize::MAX).is_none());
}

// ── images ───────────────────────────────────────────────────────────

#[tokio::test]
async fn request_image_uses_background_image_url() {
    let (store, _observer) = store_with(MockService::default());
    let denim = card("Denim");

    let image = tokio::spawn(store.request_image(&denim)).await.unwrap();

    assert!(image.is_none());
    assert_eq!(
        *store.service().image_requests.lock().unwrap(),
        vec!["http://example.com/denim.jpg".to_string()]
    );
}
