//! Item families and their aggregation policies

pub mod news;
pub mod posts;
pub mod signals;
pub mod tweets;

pub use news::{curated_headlines, Headline, NewsMetrics, NewsPolicy, NewsSentiment};
pub use posts::{sample_posts, Post, PostPolicy, PostSentiment};
pub use signals::{
    confidence_score, curated_channels, curated_signals, Channel, MarketBias, SignalConfidence,
    SignalMetrics, SignalPolicy, SignalSentiment, SignalType, TradingSignal,
};
pub use tweets::{hype_meter, mock_tweets, HypeLevel, HypeMetrics, Tweet, TweetPolicy, TweetSentiment};
