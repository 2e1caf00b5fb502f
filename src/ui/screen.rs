use super::action::{activate, ActionDispatcher};
use super::loader::{DrainStats, ImageLoader};
use super::slot::RowSlot;
use crate::error::ExploreCardError;
use crate::service::ExploreService;
use crate::store::{ExploreCardObserver, ExploreCardStore};
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;

/// Shown when the card list could not be loaded
pub const RETRY_MESSAGE: &str =
    "Failed to load explore content. Please check your internet connection.";

/// Load outcome as seen by the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    Loaded,
    Failed { message: String },
}

/// Store observer that queues outcomes for the screen's next update
#[derive(Debug, Default)]
pub struct ScreenStatus {
    events: Mutex<Vec<ScreenEvent>>,
}

impl ScreenStatus {
    pub fn take_events(&self) -> Vec<ScreenEvent> {
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *events)
    }

    fn push(&self, event: ScreenEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}

impl ExploreCardObserver for ScreenStatus {
    fn did_load_cards(&self) {
        self.push(ScreenEvent::Loaded);
    }

    fn did_fail_loading_cards(&self, error: &ExploreCardError) {
        self.push(ScreenEvent::Failed {
            message: error.to_string(),
        });
    }
}

/// The explore list: a window of reusable row slots over the store's cards
pub struct ExploreScreen<S: ExploreService> {
    store: ExploreCardStore<S>,
    status: Arc<ScreenStatus>,
    images: ImageLoader,
    slots: Vec<RowSlot>,
    first_row: usize,
    visible_rows: usize,
    alert: Option<String>,
}

impl<S: ExploreService> ExploreScreen<S> {
    pub fn new(service: Arc<S>, runtime: Handle, visible_rows: usize) -> Self {
        let mut store = ExploreCardStore::new(service, runtime.clone());
        let status = Arc::new(ScreenStatus::default());
        store.set_observer(&status);
        Self {
            store,
            status,
            images: ImageLoader::new(runtime),
            slots: Vec::new(),
            first_row: 0,
            visible_rows: visible_rows.max(1),
            alert: None,
        }
    }

    pub fn store(&self) -> &ExploreCardStore<S> {
        &self.store
    }

    pub fn slots(&self) -> &[RowSlot] {
        &self.slots
    }

    pub fn first_row(&self) -> usize {
        self.first_row
    }

    /// Retry prompt, set after a failed load until the next load starts
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Initial load and user-triggered retry
    pub fn load(&mut self) {
        self.alert = None;
        self.store.load_cards();
    }

    /// Apply whatever has arrived since the last update, without waiting
    pub fn update(&mut self) -> DrainStats {
        self.store.process_events();
        self.handle_events();
        self.images.drain(&mut self.slots)
    }

    /// Wait for the card fetch in flight, if any
    pub async fn settle_cards(&mut self) {
        self.store.settle().await;
        self.handle_events();
    }

    /// Wait for every outstanding image request
    pub async fn settle_images(&mut self) -> DrainStats {
        self.images.settle(&mut self.slots).await
    }

    pub async fn settle(&mut self) -> DrainStats {
        self.settle_cards().await;
        self.settle_images().await
    }

    fn handle_events(&mut self) {
        for event in self.status.take_events() {
            match event {
                ScreenEvent::Loaded => {
                    self.first_row = 0;
                    self.show_rows();
                }
                ScreenEvent::Failed { message } => {
                    log::error!("Failed to load explore data: {}", message);
                    self.alert = Some(RETRY_MESSAGE.to_string());
                }
            }
        }
    }

    /// Move the window so `first_row` is the top slot; slots are reused
    pub fn scroll_to(&mut self, first_row: usize) {
        let last_start = self
            .store
            .number_of_cards()
            .saturating_sub(self.visible_rows);
        self.first_row = first_row.min(last_start);
        self.show_rows();
    }

    fn show_rows(&mut self) {
        let Self {
            store,
            images,
            slots,
            first_row,
            visible_rows,
            ..
        } = self;

        let count = (*visible_rows).min(store.number_of_cards().saturating_sub(*first_row));
        slots.resize_with(count, RowSlot::new);

        for (index, slot) in slots.iter_mut().enumerate() {
            let Some(card) = store.card(*first_row + index) else {
                slot.prepare_for_reuse();
                continue;
            };
            // Same card still here: new row text, image kept or still on the way
            if slot.is_displaying(card.id()) {
                slot.refresh(card);
                continue;
            }
            slot.prepare_for_reuse();
            slot.configure(card);
            images.request(store, index, card);
        }
    }

    /// Activate button `button` of visible slot `slot`
    pub fn activate(&self, slot: usize, button: usize, dispatcher: &dyn ActionDispatcher) -> bool {
        let item = self
            .first_row
            .checked_add(slot)
            .and_then(|row| self.store.card(row))
            .and_then(|card| card.content_items().get(button));
        match item {
            Some(item) => activate(dispatcher, item),
            None => false,
        }
    }

    pub fn render(&self) -> String {
        let mut sections: Vec<String> = self.slots.iter().filter_map(RowSlot::render).collect();
        if sections.is_empty() && self.store.is_loading() {
            sections.push("Loading...".to_string());
        }
        if let Some(alert) = &self.alert {
            sections.push(format!("Network Error: {}", alert));
        }
        sections.join("\n\n")
    }
}

#[cfg(test)]
#[path = "screen_tests.rs"]
mod tests;
