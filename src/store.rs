//! Card store: the explore screen's view model
//!
//! Holds the current card list and the in-flight fetch, if any. Fetches run as
//! tokio tasks; their outcomes come back over a oneshot channel and are applied
//! by the owner of the store (the UI loop), so every state change and observer
//! call happens on that one context.

use crate::cache::ImageData;
use crate::error::{ExploreCardError, ExploreResult};
use crate::models::ExploreCard;
use crate::service::ExploreService;
use std::future::Future;
use std::sync::{Arc, Weak};
use tokio::runtime::Handle;
use tokio::sync::oneshot::{self, error::TryRecvError};

/// Receives load outcomes from an [`ExploreCardStore`]
pub trait ExploreCardObserver: Send + Sync {
    fn did_load_cards(&self);
    fn did_fail_loading_cards(&self, error: &ExploreCardError);
}

type FetchOutcome = ExploreResult<Vec<ExploreCard>>;

pub struct ExploreCardStore<S: ExploreService> {
    service: Arc<S>,
    runtime: Handle,
    cards: Vec<ExploreCard>,
    /// Present while a fetch is in flight; doubles as the loading flag
    in_flight: Option<oneshot::Receiver<FetchOutcome>>,
    /// Not owned; a dropped observer simply stops receiving notifications
    observer: Option<Weak<dyn ExploreCardObserver>>,
}

impl<S: ExploreService> ExploreCardStore<S> {
    /// Create an empty store whose fetches run on `runtime`
    pub fn new(service: Arc<S>, runtime: Handle) -> Self {
        Self {
            service,
            runtime,
            cards: Vec::new(),
            in_flight: None,
            observer: None,
        }
    }

    pub fn set_observer<O: ExploreCardObserver + 'static>(&mut self, observer: &Arc<O>) {
        let observer: Weak<O> = Arc::downgrade(observer);
        self.observer = Some(observer);
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    pub fn cards(&self) -> &[ExploreCard] {
        &self.cards
    }

    pub fn number_of_cards(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start a fetch cycle. Does nothing while one is already in flight.
    pub fn load_cards(&mut self) {
        if self.in_flight.is_some() {
            log::debug!("Explore cards already loading, ignoring request");
            return;
        }

        let (sender, receiver) = oneshot::channel();
        self.in_flight = Some(receiver);

        let service = Arc::clone(&self.service);
        self.runtime.spawn(async move {
            let outcome = service.fetch_explore_data().await;
            // Fails only if the store was dropped mid-fetch
            if sender.send(outcome).is_err() {
                log::debug!("Card store dropped before fetch completed");
            }
        });
    }

    /// Apply the fetch outcome if it has arrived, without waiting.
    /// Returns how many outcomes were applied.
    pub fn process_events(&mut self) -> usize {
        let Some(receiver) = self.in_flight.as_mut() else {
            return 0;
        };
        let outcome = match receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return 0,
            Err(TryRecvError::Closed) => Err(ExploreCardError::Interrupted),
        };
        self.in_flight = None;
        self.apply(outcome);
        1
    }

    /// Wait for the in-flight fetch, if any, and apply its outcome
    pub async fn settle(&mut self) {
        let Some(receiver) = self.in_flight.as_mut() else {
            return;
        };
        // A closed channel means the fetch task died without answering
        let outcome = receiver.await.unwrap_or(Err(ExploreCardError::Interrupted));
        self.in_flight = None;
        self.apply(outcome);
    }

    /// Publish an outcome; the loading flag is already cleared
    fn apply(&mut self, outcome: FetchOutcome) {
        match outcome {
            Ok(cards) => {
                log::info!("Loaded {} explore cards", cards.len());
                self.cards = cards;
                self.notify(|observer| observer.did_load_cards());
            }
            Err(e) => {
                log::warn!("Failed to load explore cards ({}): {}", e.kind(), e);
                self.notify(|observer| observer.did_fail_loading_cards(&e));
            }
        }
    }

    fn notify(&self, f: impl FnOnce(&dyn ExploreCardObserver)) {
        if let Some(observer) = self.observer.as_ref().and_then(Weak::upgrade) {
            f(&*observer);
        }
    }

    /// Bounds-checked lookup; negative and out-of-range indices give `None`
    pub fn card_at(&self, index: isize) -> Option<&ExploreCard> {
        usize::try_from(index).ok().and_then(|index| self.card(index))
    }

    /// Lookup by row position
    pub fn card(&self, index: usize) -> Option<&ExploreCard> {
        self.cards.get(index)
    }

    /// Load the card's background image through the service.
    ///
    /// The returned future owns everything it needs, so callers can spawn it.
    pub fn request_image(
        &self,
        card: &ExploreCard,
    ) -> impl Future<Output = Option<ImageData>> + Send + 'static {
        let service = Arc::clone(&self.service);
        let url = card.background_image.clone();
        async move { service.load_image(&url).await }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
