//! Scores every item family with VADER and prints the derived indices
//!
//! Run with `cargo run -p research-agents --example demo`

use chrono::Utc;
use research_agents::families::{
    curated_headlines, curated_signals, mock_tweets, sample_posts, NewsPolicy, PostPolicy,
    SignalPolicy, TweetPolicy,
};
use research_agents::{SentimentAggregator, VaderScorer};
use std::sync::Arc;
use tracing::info;

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    info!("🤖 Sentiment families demo");

    let aggregator = SentimentAggregator::new(Arc::new(VaderScorer::new()));
    let now = Utc::now();

    let mut rng = fastrand::Rng::with_seed(2024);
    let posts = aggregator.aggregate(&PostPolicy, sample_posts(&mut rng, 10));
    info!(
        "Posts: {:?} ({}) {}+ / {}- / {}~",
        posts.overall_label,
        posts.overall_score,
        posts.counts.positive,
        posts.counts.negative,
        posts.counts.neutral
    );
    for post in &posts.items {
        info!("  {:>6.3} {:?}  {}", post.score, post.label, post.item.text);
    }

    let news = aggregator.aggregate(&NewsPolicy, curated_headlines(now));
    info!("News: {:?} - {}", news.overall_label, news.metrics.description);

    let tweets = aggregator.aggregate(&TweetPolicy, mock_tweets(now));
    info!(
        "Tweets: hype meter {} ({:?})",
        tweets.metrics.hype_meter, tweets.metrics.hype_level
    );

    let signals = aggregator.aggregate(&SignalPolicy, curated_signals());
    info!(
        "Signals: {:?}, avg confidence {} ({} buy / {} sell / {} alert)",
        signals.metrics.market_bias,
        signals.metrics.avg_confidence,
        signals.metrics.buy_signals,
        signals.metrics.sell_signals,
        signals.metrics.alert_signals
    );
}
