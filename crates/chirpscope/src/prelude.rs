//! Prelude module for convenient imports
//!
//! Import everything you need with:
//! ```rust
//! use chirpscope::prelude::*;
//! ```

pub use crate::{
    Credentials, TwitterConfig, TwitterClient, TwitterError, TwitterResult,
    FileSink, FilteredStream, StreamHandler,
    Tweet, TweetMetrics, User, UserMetrics, StreamRule,
    LineChart, TableSummary, TweetRow, TweetTable, user_details,
};
