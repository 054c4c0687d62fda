// Twitter v2 REST client (HTTP direct, no SDK)

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::TwitterConfig;
use crate::error::{TwitterError, TwitterResult};
use crate::types::{ApiErrorBody, ApiResponse, Tweet, User};

/// Fields requested for every tweet payload.
const TWEET_FIELDS: &str = "id,text,author_id,created_at,public_metrics,source,lang";

/// Fields requested for every user payload.
const USER_FIELDS: &str =
    "id,name,username,description,location,profile_image_url,created_at,public_metrics";

/// Timelines accept 5..=100 results per page.
const TWEET_PAGE_MAX: u32 = 100;

/// Follower/following endpoints accept 1..=1000 results per page.
const USER_PAGE_MAX: u32 = 1000;

/// Authenticated Twitter v2 REST client.
///
/// Pagination helpers drain the API's cursor (`next_token`) until the requested
/// number of items is collected or the cursor is exhausted. No retry logic:
/// rate limiting surfaces as [`TwitterError::RateLimited`].
pub struct TwitterClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl TwitterClient {
    /// Create a client with the bearer token baked into default headers.
    pub fn new(config: &TwitterConfig) -> TwitterResult<Self> {
        let bearer = &config.credentials.bearer_token;
        if bearer.is_empty() {
            return Err(TwitterError::Config("bearer token is empty".into()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", bearer))
            .map_err(|_| TwitterError::Config("bearer token contains invalid characters".into()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .user_agent(format!("chirpscope/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Look up a user by username (handle without the @).
    pub async fn get_user(&self, username: &str) -> TwitterResult<User> {
        let response: ApiResponse<User> = self
            .get_json(
                &format!("/2/users/by/username/{}", username),
                &[("user.fields", USER_FIELDS.to_string())],
            )
            .await?;

        response.data.ok_or_else(|| api_error_from(response.errors))
    }

    /// The authenticated user.
    pub async fn me(&self) -> TwitterResult<User> {
        let response: ApiResponse<User> = self
            .get_json("/2/users/me", &[("user.fields", USER_FIELDS.to_string())])
            .await?;

        response.data.ok_or_else(|| api_error_from(response.errors))
    }

    /// A user's own tweets, newest first, draining pages until `count`.
    pub async fn user_timeline(&self, user_id: &str, count: u32) -> TwitterResult<Vec<Tweet>> {
        self.drain_cursor(
            &format!("/2/users/{}/tweets", user_id),
            &[("tweet.fields", TWEET_FIELDS.to_string())],
            count,
            TWEET_PAGE_MAX,
        )
        .await
    }

    /// A user's reverse-chronological home timeline.
    pub async fn home_timeline(&self, user_id: &str, count: u32) -> TwitterResult<Vec<Tweet>> {
        self.drain_cursor(
            &format!("/2/users/{}/timelines/reverse_chronological", user_id),
            &[("tweet.fields", TWEET_FIELDS.to_string())],
            count,
            TWEET_PAGE_MAX,
        )
        .await
    }

    /// Users following the given user.
    pub async fn followers(&self, user_id: &str, count: u32) -> TwitterResult<Vec<User>> {
        self.drain_cursor(
            &format!("/2/users/{}/followers", user_id),
            &[("user.fields", USER_FIELDS.to_string())],
            count,
            USER_PAGE_MAX,
        )
        .await
    }

    /// Users the given user follows (the original "friends" list).
    pub async fn following(&self, user_id: &str, count: u32) -> TwitterResult<Vec<User>> {
        self.drain_cursor(
            &format!("/2/users/{}/following", user_id),
            &[("user.fields", USER_FIELDS.to_string())],
            count,
            USER_PAGE_MAX,
        )
        .await
    }

    /// Drain a paginated endpoint into a list.
    ///
    /// Follows `meta.next_token` until `count` items are collected, a page
    /// comes back empty, or the cursor is exhausted. Item order is exactly the
    /// order pages return them in.
    async fn drain_cursor<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        base_params: &[(&str, String)],
        count: u32,
        page_max: u32,
    ) -> TwitterResult<Vec<T>> {
        let mut items: Vec<T> = Vec::new();
        let mut next_token: Option<String> = None;

        while (items.len() as u32) < count {
            let remaining = count - items.len() as u32;
            // Timelines reject max_results below 5, so over-fetch and truncate.
            let page_size = remaining.clamp(5, page_max);

            let mut params: Vec<(&str, String)> = base_params.to_vec();
            params.push(("max_results", page_size.to_string()));
            if let Some(ref token) = next_token {
                params.push(("pagination_token", token.clone()));
            }

            let page: ApiResponse<Vec<T>> = self.get_json(endpoint, &params).await?;

            let data = page.data.unwrap_or_default();
            if data.is_empty() {
                break;
            }
            items.extend(data);

            next_token = page.meta.and_then(|m| m.next_token);
            if next_token.is_none() {
                break;
            }
        }

        items.truncate(count as usize);
        Ok(items)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> TwitterResult<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(endpoint, "Twitter API request");

        let response = self.http_client.get(&url).query(params).send().await?;
        handle_response(response).await
    }
}

/// Map a response to data or a typed error.
async fn handle_response<T: DeserializeOwned>(response: Response) -> TwitterResult<T> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = seconds_until_reset(response.headers()).unwrap_or(60);
        return Err(TwitterError::RateLimited { retry_after });
    }

    let bytes = response.bytes().await?;

    if status.is_success() {
        serde_json::from_slice(&bytes).map_err(TwitterError::from)
    } else {
        let body: ApiErrorBody = serde_json::from_slice(&bytes).unwrap_or_else(|_| ApiErrorBody {
            detail: Some(String::from_utf8_lossy(&bytes).into_owned()),
            ..Default::default()
        });

        Err(TwitterError::Api {
            status: status.as_u16(),
            message: body.message(),
        })
    }
}

/// Seconds until the rate-limit window resets, per `x-rate-limit-reset`.
fn seconds_until_reset(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    let reset: u64 = headers
        .get("x-rate-limit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())?;

    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .ok()?
        .as_secs();

    reset.checked_sub(now)
}

/// Collapse partial-failure errors into a single API error.
fn api_error_from(errors: Option<Vec<ApiErrorBody>>) -> TwitterError {
    let message = errors
        .and_then(|e| e.into_iter().next())
        .map(|e| e.message())
        .unwrap_or_else(|| "Response contained no data".into());

    TwitterError::Api {
        status: 200,
        message,
    }
}
