//! # Chirpscope
//!
//! Twitter/X timeline analytics: a cursor-draining v2 API client, filtered
//! stream capture, and tabular tweet summaries with terminal line charts.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chirpscope::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let credentials = Credentials::from_env()?;
//!     let config = TwitterConfig::new(credentials);
//!     let client = TwitterClient::new(&config)?;
//!
//!     let user = client.get_user("rustlang").await?;
//!     let tweets = client.user_timeline(&user.id, 100).await?;
//!
//!     let table = TweetTable::from_tweets(&tweets);
//!     println!("{}", table.summary());
//!
//!     let likes = table.dated_series(|row| row.likes as f64);
//!     println!("{}", LineChart::new("likes over time").render(&likes));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Chirpscope is organized into focused crates:
//!
//! - **`chirpscope-twitter`**: v2 REST client with cursor pagination, plus the
//!   filtered-stream loop and [`StreamHandler`] callback interface
//! - **`chirpscope-analysis`**: tweet-to-table conversion, summary statistics
//!   and Braille terminal charts
//!
//! ## License
//!
//! MIT

pub mod prelude;

pub use chirpscope_twitter::{
    Credentials, TwitterConfig,
    TwitterClient,
    TwitterError, TwitterResult,
    FileSink, FilteredStream, StreamHandler, RATE_LIMIT_STATUS,
    ApiResponse, ResponseMeta,
    Tweet, TweetMetrics, User, UserMetrics,
    StreamRule, StreamRulesResponse,
};

pub use chirpscope_analysis::{
    LineChart,
    TableSummary, TweetRow, TweetTable,
    user_details,
};
