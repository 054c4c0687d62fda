pub mod client;
pub mod config;
pub mod error;
pub mod stream;
pub mod types;

pub use client::TwitterClient;
pub use config::{Credentials, TwitterConfig};
pub use error::{TwitterError, TwitterResult};
pub use stream::{FileSink, FilteredStream, StreamHandler, RATE_LIMIT_STATUS};
pub use types::{
    ApiResponse, ResponseMeta,
    Tweet, TweetMetrics,
    User, UserMetrics,
    StreamRule, StreamRulesResponse,
};
