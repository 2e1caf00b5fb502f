use reqwest::Url;
use serde::{Deserialize, Serialize};

/// One promotional card from the explore feed
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExploreCard {
    pub title: String,
    /// Image URL; also the card's identity for caching and slot reuse
    pub background_image: String,
    #[serde(default)]
    pub top_description: Option<String>,
    /// May contain HTML markup
    #[serde(default)]
    pub bottom_description: Option<String>,
    #[serde(default)]
    pub promo_message: Option<String>,
    #[serde(default)]
    pub content: Option<Vec<ContentItem>>,
}

/// Actionable element of a card (a labelled link)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub target: String,
    pub title: String,
    #[serde(default)]
    pub element_type: Option<String>,
}

impl ExploreCard {
    /// Identity key of the card within one load cycle
    pub fn id(&self) -> &str {
        &self.background_image
    }

    /// Content items, empty when the feed omitted them
    pub fn content_items(&self) -> &[ContentItem] {
        self.content.as_deref().unwrap_or(&[])
    }
}

impl ContentItem {
    /// The target as an absolute URL, if it parses as one
    pub fn action_url(&self) -> Option<Url> {
        Url::parse(self.target.trim()).ok()
    }
}
