use crate::config::ExploreConfig;
use crate::error::{ExploreCardError, ExploreResult};
use crate::models::ExploreCard;
use reqwest::{Client, StatusCode, Url};

/// Client for the explore card feed
#[derive(Debug, Clone)]
pub struct ExploreClient {
    client: Client,
    endpoint: String,
}

impl ExploreClient {
    /// Create a feed client sharing an existing HTTP client
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Create a feed client from configuration
    pub fn from_config(config: &ExploreConfig) -> ExploreResult<Self> {
        Ok(Self::new(config.http_client()?, config.endpoint.clone()))
    }

    /// Fetch and decode the full card list
    pub async fn fetch_cards(&self) -> ExploreResult<Vec<ExploreCard>> {
        fetch_explore_data_from(&self.client, &self.endpoint).await
    }
}

/// Fetch the card array from `endpoint`.
///
/// Only a 200 response is accepted. The body is read in full before decoding
/// so a truncated transfer is reported as a network error, not a decode error.
pub async fn fetch_explore_data_from(
    client: &Client,
    endpoint: &str,
) -> ExploreResult<Vec<ExploreCard>> {
    let url = Url::parse(endpoint).map_err(|e| {
        log::warn!("Explore endpoint {:?} is not a valid URL: {}", endpoint, e);
        ExploreCardError::InvalidUrl
    })?;

    log::info!("Fetching explore cards from: {}", url);

    let response = client.get(url).send().await?;

    let status = response.status();
    if status != StatusCode::OK {
        log::warn!("Explore feed returned {}", status);
        return Err(ExploreCardError::InvalidStatusCode(status));
    }

    let body = response.bytes().await?;
    let cards: Vec<ExploreCard> = serde_json::from_slice(&body)?;

    log::info!("Decoded {} explore cards", cards.len());
    Ok(cards)
}

#[cfg(test)]
#[path = "explore_tests.rs"]
mod tests;
