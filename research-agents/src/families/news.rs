use crate::classifier::{classify, Label};
use crate::sentiment::{AggregateResult, FamilyPolicy, NoMetrics, ScoredItem, TextItem};
use chrono::{DateTime, Duration, Utc};
use common::time_label;
use serde::{Deserialize, Serialize};

/// News headline with its outlet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    /// `HH:MM` label of `published_at`
    pub published: String,
}

impl Headline {
    pub fn new(title: &str, source: &str, published_at: DateTime<Utc>) -> Self {
        Self {
            title: title.to_string(),
            source: source.to_string(),
            published_at,
            published: time_label(published_at),
        }
    }
}

impl TextItem for Headline {
    fn text(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsMetrics {
    pub description: &'static str,
}

/// Headlines add a description bound to the overall label
pub struct NewsPolicy;

pub type NewsSentiment = AggregateResult<Headline, NoMetrics, NewsMetrics>;

fn describe(label: Label) -> &'static str {
    match label {
        Label::Positive => "Headlines are broadly positive",
        Label::Negative => "Headlines show concern",
        Label::Neutral => "Balanced sentiment across headlines",
    }
}

impl FamilyPolicy for NewsPolicy {
    type Item = Headline;
    type ItemMetrics = NoMetrics;
    type Metrics = NewsMetrics;

    fn family(&self) -> &'static str {
        "news"
    }

    fn item_metrics(&self, _item: &Headline, _raw_score: f64) -> NoMetrics {
        NoMetrics {}
    }

    fn metrics(&self, _items: &[ScoredItem<Headline, NoMetrics>], overall_score: f64) -> NewsMetrics {
        NewsMetrics {
            description: describe(classify(overall_score)),
        }
    }
}

/// Curated financial headlines, newest first
pub fn curated_headlines(now: DateTime<Utc>) -> Vec<Headline> {
    [
        ("Bitcoin ETF approval drives institutional adoption surge", "Bloomberg", 2),
        ("Major cryptocurrency exchange faces regulatory scrutiny", "CoinDesk", 4),
        ("Federal Reserve hints at digital dollar development", "Reuters", 6),
        ("Crypto market volatility reaches new monthly high", "Financial Times", 8),
        ("Blockchain technology adoption accelerates in banking sector", "Wall Street Journal", 12),
    ]
    .into_iter()
    .map(|(title, source, hours_ago)| Headline::new(title, source, now - Duration::hours(hours_ago)))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::StaticScorer;
    use crate::sentiment::SentimentAggregator;
    use std::sync::Arc;

    #[test]
    fn test_curated_headlines_are_ordered() {
        let now = Utc::now();
        let headlines = curated_headlines(now);

        assert_eq!(headlines.len(), 5);
        assert_eq!(headlines[0].published_at, now - Duration::hours(2));
        assert!(headlines.windows(2).all(|w| w[0].published_at > w[1].published_at));
    }

    #[test]
    fn test_description_follows_label() {
        let headlines = curated_headlines(Utc::now());

        let negative = SentimentAggregator::new(Arc::new(StaticScorer::new(-0.4)));
        let result = negative.aggregate(&NewsPolicy, headlines.clone());
        assert_eq!(result.overall_label, Label::Negative);
        assert_eq!(result.metrics.description, "Headlines show concern");

        let neutral = SentimentAggregator::new(Arc::new(StaticScorer::new(0.0)));
        let result = neutral.aggregate(&NewsPolicy, headlines);
        assert_eq!(result.metrics.description, "Balanced sentiment across headlines");
    }

    #[test]
    fn test_empty_news_is_balanced() {
        let aggregator = SentimentAggregator::new(Arc::new(StaticScorer::new(0.9)));
        let result = aggregator.aggregate(&NewsPolicy, Vec::new());
        assert_eq!(result.metrics.description, "Balanced sentiment across headlines");
    }
}
