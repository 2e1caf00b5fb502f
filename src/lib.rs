pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod ui;

// Re-export commonly used items
pub use api::{ExploreClient, HttpImageFetcher, ImageFetcher};
pub use cache::{ImageCache, ImageData};
pub use config::{ExploreConfig, EXPLORE_DATA_URL};
pub use error::{ExploreCardError, ExploreResult};
pub use models::{ContentItem, ExploreCard};
pub use service::{ExploreService, NetworkService};
pub use store::{ExploreCardObserver, ExploreCardStore};
pub use ui::{ExploreScreen, RowSlot};
