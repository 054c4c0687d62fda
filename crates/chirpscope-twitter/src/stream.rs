//! Filtered-stream capture.
//!
//! Connects to the v2 filtered stream and feeds each newline-delimited payload
//! to a [`StreamHandler`]. No reconnection logic: the loop runs until the
//! transport ends or the handler signals stop.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info, warn};

use crate::config::TwitterConfig;
use crate::error::{TwitterError, TwitterResult};
use crate::types::{StreamRule, StreamRulesResponse};

/// Legacy disconnect code for rate-limited stream connections.
pub const RATE_LIMIT_STATUS: u16 = 420;

/// Stream callback interface.
///
/// Both methods return a continuation signal: `true` keeps the stream running,
/// `false` stops it.
#[async_trait]
pub trait StreamHandler: Send {
    /// Called once per received payload line.
    async fn on_data(&mut self, payload: &str) -> bool;

    /// Called with the HTTP status when the connection is refused.
    async fn on_error(&mut self, status: u16) -> bool;
}

/// Handler that prints each payload and appends it to a file.
///
/// The file grows without bound; each write reopens the file in append mode so
/// no descriptor is held between callbacks. A failed write is logged and the
/// stream continues.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn append(&self, payload: &str) -> std::io::Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(payload.as_bytes()).await?;
        file.write_all(b"\n").await?;
        Ok(())
    }
}

#[async_trait]
impl StreamHandler for FileSink {
    async fn on_data(&mut self, payload: &str) -> bool {
        println!("{}", payload);

        if let Err(e) = self.append(payload).await {
            error!(path = %self.path.display(), error = %e, "Failed to write stream payload");
        }
        true
    }

    async fn on_error(&mut self, status: u16) -> bool {
        // 420 is the legacy rate-limit disconnect; 429 is its v2 equivalent.
        if status == RATE_LIMIT_STATUS || status == 429 {
            warn!(status, "Rate limited, stopping stream");
            return false;
        }
        warn!(status, "Stream error status");
        true
    }
}

/// Connection to the v2 filtered stream.
pub struct FilteredStream {
    http_client: reqwest::Client,
    base_url: String,
}

impl FilteredStream {
    pub fn new(config: &TwitterConfig) -> TwitterResult<Self> {
        let bearer = &config.credentials.bearer_token;
        if bearer.is_empty() {
            return Err(TwitterError::Config(
                "bearer token required for streaming".into(),
            ));
        }

        let mut headers = reqwest::header::HeaderMap::new();
        let mut auth = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", bearer))
            .map_err(|_| TwitterError::Config("bearer token contains invalid characters".into()))?;
        auth.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        // No total timeout: the connection is expected to stay open.
        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Replace the active rule set with one keyword rule per entry.
    pub async fn set_rules(&self, keywords: &[String]) -> TwitterResult<()> {
        let url = format!("{}/2/tweets/search/stream/rules", self.base_url);

        // Delete whatever rules a previous run left behind.
        let existing: StreamRulesResponse = self
            .http_client
            .get(&url)
            .send()
            .await?
            .json()
            .await?;

        let ids: Vec<String> = existing
            .data
            .unwrap_or_default()
            .into_iter()
            .filter_map(|r| r.id)
            .collect();

        if !ids.is_empty() {
            debug!(count = ids.len(), "Deleting existing stream rules");
            self.http_client
                .post(&url)
                .json(&serde_json::json!({ "delete": { "ids": ids } }))
                .send()
                .await?;
        }

        let rules: Vec<StreamRule> = keywords
            .iter()
            .map(|k| StreamRule::keyword(k.clone()))
            .collect();

        let response = self
            .http_client
            .post(&url)
            .json(&serde_json::json!({ "add": rules }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TwitterError::Api {
                status,
                message: body,
            });
        }

        Ok(())
    }

    /// Connect and pump payload lines into the handler until it signals stop
    /// or the transport ends.
    pub async fn run<H: StreamHandler>(&self, handler: &mut H) -> TwitterResult<()> {
        let url = format!(
            "{}/2/tweets/search/stream?tweet.fields=id,text,author_id,created_at,public_metrics,source",
            self.base_url
        );

        info!("Connecting to filtered stream");
        let response = self.http_client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let stop = !handler.on_error(status.as_u16()).await;
            if stop {
                return Ok(());
            }
            return Err(TwitterError::Stream(format!(
                "stream connection refused with status {}",
                status.as_u16()
            )));
        }

        let mut byte_stream = response.bytes_stream();
        let mut buffer: Vec<u8> = Vec::with_capacity(8192);

        while let Some(chunk) = byte_stream.next().await {
            let chunk = chunk.map_err(|e| TwitterError::Stream(e.to_string()))?;
            buffer.extend_from_slice(&chunk);

            while let Some(newline_pos) = buffer.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=newline_pos).collect();
                let payload = String::from_utf8_lossy(&line).trim().to_string();

                // Blank lines are keep-alive heartbeats.
                if payload.is_empty() {
                    debug!("Received heartbeat");
                    continue;
                }

                if !handler.on_data(&payload).await {
                    info!("Handler requested stop");
                    return Ok(());
                }
            }
        }

        info!("Stream ended");
        Ok(())
    }
}
