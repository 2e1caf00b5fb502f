//! Feed configuration

/// Production explore feed
pub const EXPLORE_DATA_URL: &str =
    "https://www.abercrombie.com/anf/nativeapp/qa/codetest/codeTest_exploreData.css";

/// User agent sent with every feed and image request
pub const USER_AGENT: &str = "ExploreCards/1.0";

/// Where the feed lives and how requests identify themselves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExploreConfig {
    pub endpoint: String,
    pub user_agent: String,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        Self {
            endpoint: EXPLORE_DATA_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl ExploreConfig {
    /// Same defaults, different feed endpoint (mock servers, staging feeds)
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Build the shared HTTP client for feed and image requests
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .build()
    }
}
