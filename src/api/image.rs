use crate::error::{ExploreCardError, ExploreResult};
use reqwest::{Client, Url};
use std::future::Future;

/// Source of raw image bytes for the image cache.
///
/// Implemented over HTTP for the app; tests substitute counting fakes.
pub trait ImageFetcher: Send + Sync + 'static {
    fn fetch(&self, url: &str) -> impl Future<Output = ExploreResult<Vec<u8>>> + Send;
}

/// Image fetcher backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> ExploreResult<Vec<u8>> {
        fetch_image(&self.client, url).await
    }
}

/// Fetch image bytes from a URL
pub async fn fetch_image(client: &Client, url: &str) -> ExploreResult<Vec<u8>> {
    let url = Url::parse(url).map_err(|_| ExploreCardError::InvalidUrl)?;

    log::debug!("Fetching image from URL: {}", url);

    let response = client.get(url).send().await?;

    if response.status().is_success() {
        Ok(response.bytes().await?.to_vec())
    } else {
        Err(ExploreCardError::InvalidStatusCode(response.status()))
    }
}
