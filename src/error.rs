//! Error types for the explore card feed

use thiserror::Error;

/// Classified failure of a card feed fetch
#[derive(Debug, Error)]
pub enum ExploreCardError {
    /// The feed endpoint is not a valid absolute URL
    #[error("Invalid URL")]
    InvalidUrl,
    /// The feed answered with anything other than 200 OK
    #[error("Invalid status code: {0}")]
    InvalidStatusCode(reqwest::StatusCode),
    /// The payload did not match the expected card array shape
    #[error("Failed to decode JSON: {0}")]
    Decode(#[from] serde_json::Error),
    /// Connectivity, DNS, timeout or body read failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// The fetch task ended without producing a result
    #[error("Fetch interrupted")]
    Interrupted,
}

impl ExploreCardError {
    /// Short label for the failure kind, used in logs and the retry prompt
    pub fn kind(&self) -> &'static str {
        match self {
            ExploreCardError::InvalidUrl => "invalid_url",
            ExploreCardError::InvalidStatusCode(_) => "bad_status",
            ExploreCardError::Decode(_) => "decode",
            ExploreCardError::Network(_) => "network",
            ExploreCardError::Interrupted => "interrupted",
        }
    }
}

/// Result type alias for feed operations
pub type ExploreResult<T> = Result<T, ExploreCardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(ExploreCardError::InvalidUrl.to_string(), "Invalid URL");
        assert_eq!(ExploreCardError::Interrupted.to_string(), "Fetch interrupted");
        assert_eq!(
            ExploreCardError::InvalidStatusCode(reqwest::StatusCode::NOT_FOUND).to_string(),
            "Invalid status code: 404 Not Found"
        );
    }

    #[test]
    fn test_decode_error_from_serde() {
        let err = serde_json::from_str::<Vec<u32>>("{").unwrap_err();
        let err: ExploreCardError = err.into();
        assert!(matches!(err, ExploreCardError::Decode(_)));
        assert!(err.to_string().starts_with("Failed to decode JSON"));
        assert_eq!(err.kind(), "decode");
    }
}
