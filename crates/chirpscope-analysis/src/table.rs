//! Tweet-to-table conversion.
//!
//! One row per input tweet, input order preserved, no filtering and no
//! validation. The row count always equals the input tweet count.

use std::fmt;

use chirpscope_twitter::Tweet;
use chrono::{DateTime, Utc};

/// Width the text column is truncated to when rendering.
const TEXT_DISPLAY_WIDTH: usize = 40;

/// One derived row of the table.
#[derive(Debug, Clone)]
pub struct TweetRow {
    pub text: String,
    pub id: String,
    /// Character count of `text` (Unicode scalar values, not bytes)
    pub length: usize,
    pub date: Option<DateTime<Utc>>,
    pub source: String,
    pub likes: u64,
    pub retweets: u64,
}

impl TweetRow {
    fn from_tweet(tweet: &Tweet) -> Self {
        Self {
            text: tweet.text.clone(),
            id: tweet.id.clone(),
            length: tweet.text.chars().count(),
            date: tweet.created_at,
            source: tweet.source.clone().unwrap_or_default(),
            likes: tweet.likes(),
            retweets: tweet.retweets(),
        }
    }
}

/// Tabular view over a batch of tweets.
#[derive(Debug, Clone, Default)]
pub struct TweetTable {
    rows: Vec<TweetRow>,
}

impl TweetTable {
    /// The fixed column set, in rendering order.
    pub const COLUMNS: [&'static str; 7] =
        ["text", "id", "length", "date", "source", "likes", "retweets"];

    /// Build the table, one row per tweet, preserving input order.
    pub fn from_tweets(tweets: &[Tweet]) -> Self {
        Self {
            rows: tweets.iter().map(TweetRow::from_tweet).collect(),
        }
    }

    pub fn rows(&self) -> &[TweetRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Like counts, row order.
    pub fn likes(&self) -> Vec<u64> {
        self.rows.iter().map(|r| r.likes).collect()
    }

    /// Retweet counts, row order.
    pub fn retweets(&self) -> Vec<u64> {
        self.rows.iter().map(|r| r.retweets).collect()
    }

    /// Text lengths, row order.
    pub fn lengths(&self) -> Vec<usize> {
        self.rows.iter().map(|r| r.length).collect()
    }

    /// (date, value) pairs for rows that carry a timestamp.
    pub fn dated_series<F>(&self, value: F) -> Vec<(DateTime<Utc>, f64)>
    where
        F: Fn(&TweetRow) -> f64,
    {
        self.rows
            .iter()
            .filter_map(|r| r.date.map(|d| (d, value(r))))
            .collect()
    }

    /// Aggregate statistics over the table.
    pub fn summary(&self) -> TableSummary {
        let n = self.rows.len();
        let mean = |total: u64| {
            if n == 0 {
                0.0
            } else {
                total as f64 / n as f64
            }
        };

        TableSummary {
            row_count: n,
            max_likes: self.rows.iter().map(|r| r.likes).max().unwrap_or(0),
            mean_likes: mean(self.rows.iter().map(|r| r.likes).sum()),
            max_retweets: self.rows.iter().map(|r| r.retweets).max().unwrap_or(0),
            mean_retweets: mean(self.rows.iter().map(|r| r.retweets).sum()),
            mean_length: mean(self.rows.iter().map(|r| r.length as u64).sum()),
        }
    }
}

impl fmt::Display for TweetTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<width$}  {:>19}  {:>6}  {:>20}  {:<18}  {:>6}  {:>8}",
            "text",
            "id",
            "length",
            "date",
            "source",
            "likes",
            "retweets",
            width = TEXT_DISPLAY_WIDTH,
        )?;

        for row in &self.rows {
            let date = row
                .date
                .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default();

            writeln!(
                f,
                "{:<width$}  {:>19}  {:>6}  {:>20}  {:<18}  {:>6}  {:>8}",
                truncate(&row.text, TEXT_DISPLAY_WIDTH),
                row.id,
                row.length,
                date,
                truncate(&row.source, 18),
                row.likes,
                row.retweets,
                width = TEXT_DISPLAY_WIDTH,
            )?;
        }

        Ok(())
    }
}

/// Truncate to `max` characters, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();

    if flat.chars().count() <= max {
        flat
    } else {
        let mut out: String = flat.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

/// Aggregate numbers computed from a [`TweetTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct TableSummary {
    pub row_count: usize,
    pub max_likes: u64,
    pub mean_likes: f64,
    pub max_retweets: u64,
    pub mean_retweets: f64,
    pub mean_length: f64,
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tweets analyzed: {}", self.row_count)?;
        writeln!(
            f,
            "Likes:    max {:>6}, mean {:>8.2}",
            self.max_likes, self.mean_likes
        )?;
        writeln!(
            f,
            "Retweets: max {:>6}, mean {:>8.2}",
            self.max_retweets, self.mean_retweets
        )?;
        write!(f, "Text length: mean {:.1} characters", self.mean_length)
    }
}
