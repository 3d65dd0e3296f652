//! Sentiment research for the crypto dashboard
//!
//! This crate turns short texts into sentiment signals:
//! - `Scorer` capability (VADER in production, fixed tables in tests)
//! - Three-way classifier with a fixed ±0.05 deadband
//! - One generic aggregator, parameterized by a family policy
//! - Four families: social posts, news headlines, tweets, trading signals

pub mod classifier;
pub mod families;
pub mod scorer;
pub mod sentiment;

// Re-export commonly used types
pub use classifier::{classify, Label, NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD};
pub use scorer::{Scorer, StaticScorer, VaderScorer};
pub use sentiment::{AggregateResult, Counts, FamilyPolicy, NoMetrics, ScoredItem, SentimentAggregator, TextItem};
