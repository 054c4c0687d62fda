//! Twitter API v2 wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard v2 response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// The primary data.
    ///
    /// No `serde(default)` here: the derive would demand `T: Default`, and a
    /// missing field already deserializes to `None`.
    pub data: Option<T>,

    /// Pagination and counting metadata
    #[serde(default)]
    pub meta: Option<ResponseMeta>,

    /// Partial-failure errors
    #[serde(default)]
    pub errors: Option<Vec<ApiErrorBody>>,
}

/// Response metadata (pagination cursor lives here).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseMeta {
    #[serde(default)]
    pub result_count: Option<u32>,

    /// Cursor for the next page; absent when the cursor is exhausted
    #[serde(default)]
    pub next_token: Option<String>,

    #[serde(default)]
    pub previous_token: Option<String>,

    #[serde(default)]
    pub newest_id: Option<String>,

    #[serde(default)]
    pub oldest_id: Option<String>,
}

/// Error object as returned in v2 response bodies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub detail: Option<String>,

    #[serde(default, rename = "type")]
    pub error_type: Option<String>,

    #[serde(default)]
    pub status: Option<u16>,
}

impl ApiErrorBody {
    /// Best human-readable message available.
    pub fn message(&self) -> String {
        self.detail
            .clone()
            .or_else(|| self.title.clone())
            .unwrap_or_else(|| "Unknown error".into())
    }
}

/// A tweet object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tweet {
    pub id: String,

    pub text: String,

    #[serde(default)]
    pub author_id: Option<String>,

    /// Creation timestamp (ISO 8601 on the wire)
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Source application string (e.g. "Twitter Web App")
    #[serde(default)]
    pub source: Option<String>,

    #[serde(default)]
    pub lang: Option<String>,

    #[serde(default)]
    pub public_metrics: Option<TweetMetrics>,
}

impl Tweet {
    /// Like count, zero when metrics were not requested.
    pub fn likes(&self) -> u64 {
        self.public_metrics.as_ref().map_or(0, |m| m.like_count)
    }

    /// Retweet count, zero when metrics were not requested.
    pub fn retweets(&self) -> u64 {
        self.public_metrics.as_ref().map_or(0, |m| m.retweet_count)
    }
}

/// Public engagement metrics of a tweet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TweetMetrics {
    pub retweet_count: u64,
    pub reply_count: u64,
    pub like_count: u64,
    pub quote_count: u64,
}

/// A user object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,

    /// Display name
    pub name: String,

    /// Handle (without the @)
    pub username: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub profile_image_url: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub public_metrics: Option<UserMetrics>,
}

impl User {
    /// Follower count, zero when metrics were not requested.
    pub fn followers(&self) -> u64 {
        self.public_metrics
            .as_ref()
            .map_or(0, |m| m.followers_count)
    }

    /// Following ("friends") count, zero when metrics were not requested.
    pub fn following(&self) -> u64 {
        self.public_metrics
            .as_ref()
            .map_or(0, |m| m.following_count)
    }
}

/// Public counters of a user profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserMetrics {
    pub followers_count: u64,
    pub following_count: u64,
    pub tweet_count: u64,
    pub listed_count: u64,
}

/// A filtered-stream matching rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamRule {
    /// Rule ID (assigned by the API)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Match expression, e.g. a keyword
    pub value: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl StreamRule {
    pub fn keyword(value: impl Into<String>) -> Self {
        Self {
            id: None,
            value: value.into(),
            tag: None,
        }
    }
}

/// Response from the stream-rules endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamRulesResponse {
    #[serde(default)]
    pub data: Option<Vec<StreamRule>>,

    #[serde(default)]
    pub meta: Option<serde_json::Value>,

    #[serde(default)]
    pub errors: Option<Vec<ApiErrorBody>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tweet_deserializes_minimal() {
        let tweet: Tweet = serde_json::from_str(r#"{"id":"1","text":"hi"}"#).unwrap();
        assert_eq!(tweet.id, "1");
        assert_eq!(tweet.likes(), 0);
        assert_eq!(tweet.retweets(), 0);
        assert!(tweet.created_at.is_none());
    }

    #[test]
    fn test_tweet_metrics_accessors() {
        let tweet: Tweet = serde_json::from_str(
            r#"{
                "id": "42",
                "text": "metrics",
                "created_at": "2024-05-01T12:00:00.000Z",
                "public_metrics": {
                    "retweet_count": 3,
                    "reply_count": 1,
                    "like_count": 10,
                    "quote_count": 0
                }
            }"#,
        )
        .unwrap();
        assert_eq!(tweet.likes(), 10);
        assert_eq!(tweet.retweets(), 3);
        assert!(tweet.created_at.is_some());
    }

    #[test]
    fn test_envelope_without_data() {
        let response: ApiResponse<Vec<Tweet>> =
            serde_json::from_str(r#"{"meta":{"result_count":0}}"#).unwrap();
        assert!(response.data.is_none());
        assert_eq!(response.meta.unwrap().result_count, Some(0));
    }

    #[test]
    fn test_envelope_over_non_default_payload() {
        // User has no Default impl; the envelope must not require one.
        let full: ApiResponse<User> =
            serde_json::from_str(r#"{"data":{"id":"1","name":"N","username":"n"}}"#).unwrap();
        assert_eq!(full.data.unwrap().username, "n");

        let empty: ApiResponse<User> = serde_json::from_str(r#"{}"#).unwrap();
        assert!(empty.data.is_none());
    }

    #[test]
    fn test_error_body_message_fallbacks() {
        let detailed = ApiErrorBody {
            title: Some("Not Found".into()),
            detail: Some("User missing".into()),
            ..Default::default()
        };
        assert_eq!(detailed.message(), "User missing");

        let titled = ApiErrorBody {
            title: Some("Not Found".into()),
            ..Default::default()
        };
        assert_eq!(titled.message(), "Not Found");

        assert_eq!(ApiErrorBody::default().message(), "Unknown error");
    }
}
