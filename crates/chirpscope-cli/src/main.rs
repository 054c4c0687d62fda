mod config;

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chirpscope_analysis::{user_details, LineChart, TweetTable};
use chirpscope_twitter::{Credentials, FileSink, FilteredStream, TwitterClient, TwitterConfig};
use config::Config;

#[derive(Parser)]
#[command(name = "chirpscope", version, about = "Twitter timeline analytics and stream capture")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a user's timeline and print a table, summary stats and charts
    Analyze {
        /// Username to analyze (prompted for when omitted)
        #[arg(long)]
        user: Option<String>,

        /// Number of timeline tweets to fetch
        #[arg(long)]
        count: Option<u32>,
    },

    /// Capture the filtered stream into an append-only file
    Stream {
        /// Keyword to track (repeatable)
        #[arg(long, required = true)]
        track: Vec<String>,

        /// Output file for raw payloads
        #[arg(long, default_value = "stream.jsonl")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::load().map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);

    let credentials = Credentials::from_env().context("Missing Twitter credentials")?;
    let twitter_config = TwitterConfig::new(credentials)
        .with_api_url(config.api.base_url.clone())
        .with_timeout(Duration::from_secs(config.api.timeout_secs));

    match cli.command.unwrap_or(Command::Analyze {
        user: None,
        count: None,
    }) {
        Command::Analyze { user, count } => run_analyze(&config, &twitter_config, user, count).await,
        Command::Stream { track, out } => run_stream(&twitter_config, &track, &out).await,
    }
}

async fn run_analyze(
    config: &Config,
    twitter_config: &TwitterConfig,
    user: Option<String>,
    count: Option<u32>,
) -> anyhow::Result<()> {
    let username = match user {
        Some(name) => name,
        None => prompt_username()?,
    };
    let count = count.unwrap_or(config.fetch.default_count);

    let client = TwitterClient::new(twitter_config)?;

    tracing::info!(username, "Looking up user");
    let user = client
        .get_user(&username)
        .await
        .with_context(|| format!("Failed to look up user '{}'", username))?;

    println!("{}", user_details(&user));

    tracing::info!(count, "Fetching timeline");
    let tweets = client
        .user_timeline(&user.id, count)
        .await
        .context("Failed to fetch timeline")?;
    tracing::info!(fetched = tweets.len(), "Timeline fetched");

    println!("\nLatest tweets:");
    for tweet in tweets.iter().take(10) {
        println!("  {}", tweet.text.replace(['\n', '\r'], " "));
    }

    let table = TweetTable::from_tweets(&tweets);
    println!("\n{}", table);

    let summary = table.summary();
    println!("{}", summary);
    println!("Max number of likes: {}", summary.max_likes);

    let likes = table.dated_series(|row| row.likes as f64);
    let retweets = table.dated_series(|row| row.retweets as f64);

    println!();
    println!(
        "{}",
        LineChart::new(format!("{}'s likes over time", username)).render(&likes)
    );
    println!();
    println!(
        "{}",
        LineChart::new(format!("{}'s retweets over time", username)).render(&retweets)
    );

    Ok(())
}

async fn run_stream(
    twitter_config: &TwitterConfig,
    track: &[String],
    out: &std::path::Path,
) -> anyhow::Result<()> {
    let stream = FilteredStream::new(twitter_config)?;

    stream
        .set_rules(track)
        .await
        .context("Failed to set stream rules")?;

    tracing::info!(keywords = ?track, out = %out.display(), "Capturing filtered stream");

    let mut sink = FileSink::new(out);
    stream.run(&mut sink).await.context("Stream failed")?;

    Ok(())
}

fn prompt_username() -> anyhow::Result<String> {
    print!("Enter user name: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read username")?;

    let username = line.trim().trim_start_matches('@').to_string();
    if username.is_empty() {
        anyhow::bail!("No username given");
    }
    Ok(username)
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
