//! The network-facing dependency of the card store

use crate::api::explore::ExploreClient;
use crate::api::image::HttpImageFetcher;
use crate::cache::{ImageCache, ImageData};
use crate::config::ExploreConfig;
use crate::error::ExploreResult;
use crate::models::ExploreCard;
use std::future::Future;

/// Everything the card store needs from the outside world
pub trait ExploreService: Send + Sync + 'static {
    /// Fetch the full card list
    fn fetch_explore_data(&self)
        -> impl Future<Output = ExploreResult<Vec<ExploreCard>>> + Send;

    /// Load a card's background image; `None` on any failure
    fn load_image(&self, url: &str) -> impl Future<Output = Option<ImageData>> + Send;
}

/// Feed client plus image cache over one shared HTTP client
pub struct NetworkService {
    explore: ExploreClient,
    images: ImageCache<HttpImageFetcher>,
}

impl NetworkService {
    pub fn new(config: &ExploreConfig) -> ExploreResult<Self> {
        let client = config.http_client()?;
        log::debug!("Explore feed endpoint: {}", config.endpoint);
        Ok(Self {
            explore: ExploreClient::new(client.clone(), config.endpoint.clone()),
            images: ImageCache::new(HttpImageFetcher::new(client)),
        })
    }

    pub fn image_cache(&self) -> &ImageCache<HttpImageFetcher> {
        &self.images
    }
}

impl ExploreService for NetworkService {
    async fn fetch_explore_data(&self) -> ExploreResult<Vec<ExploreCard>> {
        self.explore.fetch_cards().await
    }

    async fn load_image(&self, url: &str) -> Option<ImageData> {
        self.images.load_image(url).await
    }
}
