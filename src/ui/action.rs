use crate::models::ContentItem;
use reqwest::Url;

/// Host hook that opens a content item's target
pub trait ActionDispatcher {
    fn open(&self, url: &Url);
}

/// Dispatcher for headless use: logs the URL instead of opening it
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDispatcher;

impl ActionDispatcher for LogDispatcher {
    fn open(&self, url: &Url) {
        log::info!("Opening {}", url);
    }
}

/// Activate a content item. Returns false when its target is not a URL.
pub fn activate(dispatcher: &dyn ActionDispatcher, item: &ContentItem) -> bool {
    match item.action_url() {
        Some(url) => {
            dispatcher.open(&url);
            true
        }
        None => {
            log::warn!(
                "Ignoring action {:?}: target {:?} is not a URL",
                item.title,
                item.target
            );
            false
        }
    }
}
