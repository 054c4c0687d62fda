use chirpscope_analysis::{TweetTable, user_details};
use chirpscope_twitter::Tweet;

fn tweet(id: &str, text: &str, likes: u64, retweets: u64) -> Tweet {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "text": text,
        "created_at": format!("2024-05-{:02}T12:00:00.000Z", (id.parse::<u32>().unwrap_or(1) % 28) + 1),
        "source": "Twitter Web App",
        "public_metrics": {
            "retweet_count": retweets,
            "reply_count": 0,
            "like_count": likes,
            "quote_count": 0
        }
    }))
    .unwrap()
}

#[test]
fn test_row_count_matches_input() {
    let tweets: Vec<Tweet> = (0..25)
        .map(|i| tweet(&i.to_string(), &format!("tweet {}", i), i, i * 2))
        .collect();

    let table = TweetTable::from_tweets(&tweets);
    assert_eq!(table.len(), 25);
}

#[test]
fn test_rows_preserve_input_order() {
    let tweets = vec![
        tweet("9", "last posted", 1, 0),
        tweet("3", "middle", 2, 0),
        tweet("7", "first posted", 3, 0),
    ];

    let table = TweetTable::from_tweets(&tweets);
    let ids: Vec<&str> = table.rows().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["9", "3", "7"]);
}

#[test]
fn test_length_counts_characters_not_bytes() {
    let tweets = vec![tweet("1", "héllo wörld", 0, 0)];
    let table = TweetTable::from_tweets(&tweets);

    assert_eq!(table.rows()[0].length, 11);
    assert_eq!(table.lengths(), vec![11]);
}

#[test]
fn test_empty_input_keeps_declared_columns() {
    let table = TweetTable::from_tweets(&[]);

    assert_eq!(table.len(), 0);
    assert!(table.is_empty());
    assert_eq!(
        TweetTable::COLUMNS,
        ["text", "id", "length", "date", "source", "likes", "retweets"]
    );
    assert!(table.likes().is_empty());
}

#[test]
fn test_metric_columns() {
    let tweets = vec![tweet("1", "a", 10, 3), tweet("2", "b", 7, 5)];
    let table = TweetTable::from_tweets(&tweets);

    assert_eq!(table.likes(), vec![10, 7]);
    assert_eq!(table.retweets(), vec![3, 5]);
}

#[test]
fn test_missing_metrics_default_to_zero() {
    let bare: Tweet = serde_json::from_value(serde_json::json!({
        "id": "1",
        "text": "no metrics"
    }))
    .unwrap();

    let table = TweetTable::from_tweets(&[bare]);
    let row = &table.rows()[0];
    assert_eq!(row.likes, 0);
    assert_eq!(row.retweets, 0);
    assert!(row.date.is_none());
    assert_eq!(row.source, "");
}

#[test]
fn test_summary_statistics() {
    let tweets = vec![
        tweet("1", "ab", 10, 2),
        tweet("2", "abcd", 20, 4),
        tweet("3", "abcdef", 30, 6),
    ];

    let summary = TweetTable::from_tweets(&tweets).summary();
    assert_eq!(summary.row_count, 3);
    assert_eq!(summary.max_likes, 30);
    assert!((summary.mean_likes - 20.0).abs() < f64::EPSILON);
    assert_eq!(summary.max_retweets, 6);
    assert!((summary.mean_retweets - 4.0).abs() < f64::EPSILON);
    assert!((summary.mean_length - 4.0).abs() < f64::EPSILON);
}

#[test]
fn test_summary_of_empty_table() {
    let summary = TweetTable::from_tweets(&[]).summary();
    assert_eq!(summary.row_count, 0);
    assert_eq!(summary.max_likes, 0);
    assert_eq!(summary.mean_likes, 0.0);
}

#[test]
fn test_dated_series_skips_undated_rows() {
    let dated = tweet("1", "dated", 5, 1);
    let undated: Tweet =
        serde_json::from_value(serde_json::json!({ "id": "2", "text": "undated" })).unwrap();

    let table = TweetTable::from_tweets(&[dated, undated]);
    let series = table.dated_series(|r| r.likes as f64);
    assert_eq!(series.len(), 1);
    assert!((series[0].1 - 5.0).abs() < f64::EPSILON);
}

#[test]
fn test_user_details_report_shape() {
    let user: chirpscope_twitter::User = serde_json::from_value(serde_json::json!({
        "id": "1",
        "name": "Name",
        "username": "handle",
        "location": "Internet"
    }))
    .unwrap();

    let report = user_details(&user);
    assert!(report.contains("Location: Internet"));
    assert!(report.contains("Followers: 0"));
}
