// Configuration layer for the Twitter client
// Credentials come from the environment; everything else has sensible defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{TwitterError, TwitterResult};

const DEFAULT_API_URL: &str = "https://api.twitter.com";

/// Static application credentials.
///
/// The consumer key/secret and access token/secret identify the registered
/// application; the bearer token is what the v2 endpoints actually authenticate
/// with (app-only auth).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
    pub bearer_token: String,
}

impl Credentials {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
        bearer_token: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
            bearer_token: bearer_token.into(),
        }
    }

    /// Load credentials from environment variables.
    ///
    /// `TWITTER_BEARER_TOKEN` is required; the OAuth 1.0a values are optional
    /// and default to empty strings since the v2 read endpoints only need the
    /// bearer token.
    pub fn from_env() -> TwitterResult<Self> {
        let bearer_token = std::env::var("TWITTER_BEARER_TOKEN").map_err(|_| {
            TwitterError::Config("TWITTER_BEARER_TOKEN environment variable is required".into())
        })?;

        Ok(Self {
            consumer_key: std::env::var("TWITTER_CONSUMER_KEY").unwrap_or_default(),
            consumer_secret: std::env::var("TWITTER_CONSUMER_SECRET").unwrap_or_default(),
            access_token: std::env::var("TWITTER_ACCESS_TOKEN").unwrap_or_default(),
            access_token_secret: std::env::var("TWITTER_ACCESS_TOKEN_SECRET").unwrap_or_default(),
            bearer_token,
        })
    }
}

/// Configuration for [`TwitterClient`](crate::TwitterClient).
#[derive(Debug, Clone)]
pub struct TwitterConfig {
    pub credentials: Credentials,

    /// Base URL for the API (overridable for tests)
    pub api_url: String,

    /// Request timeout for REST calls
    pub timeout: Duration,
}

impl TwitterConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_credentials() -> Credentials {
        Credentials::new("ck", "cs", "at", "ats", "bearer")
    }

    #[test]
    fn test_config_defaults() {
        let config = TwitterConfig::new(test_credentials());
        assert_eq!(config.api_url, "https://api.twitter.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_config_builder_overrides() {
        let config = TwitterConfig::new(test_credentials())
            .with_api_url("http://localhost:8080")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
