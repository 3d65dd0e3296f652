use crate::sentiment::{AggregateResult, FamilyPolicy, NoMetrics, ScoredItem, TextItem};
use chrono::{DateTime, Duration, Utc};
use common::time_label;
use serde::{Deserialize, Serialize};

const MOCK_TWEETS: &[&str] = &[
    "Bitcoin just broke $45k resistance! Next stop moon 🚀 #BTC #crypto",
    "Massive institutional adoption happening right now. This is just the beginning.",
    "Market looking bearish today. Time to DCA and HODL 💎🙌",
    "Why is everyone panicking? This is just a healthy correction.",
    "Bitcoin ETF approval could be the catalyst we've been waiting for",
    "Regulation FUD again... when will people learn? #Bitcoin",
    "Just bought more BTC. Thank me later 📈",
    "Crypto winter is over. Bull run incoming! 🐂",
    "Another day, another Bitcoin all-time high incoming",
    "Whales are accumulating. Smart money knows what's up.",
];

/// Social-stream post, live or mock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    pub text: String,
    pub author_id: String,
    pub created_at: Option<String>,
    /// `HH:MM` of `created_at`, or "Now" when it is missing or unparseable
    pub time: String,
    pub is_mock: bool,
}

impl Tweet {
    pub fn live(text: String, author_id: Option<String>, created_at: Option<String>) -> Self {
        let time = created_at
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|ts| time_label(ts.with_timezone(&Utc)))
            .unwrap_or_else(|| "Now".to_string());

        Self {
            text,
            author_id: author_id.unwrap_or_else(|| "unknown".to_string()),
            created_at,
            time,
            is_mock: false,
        }
    }
}

impl TextItem for Tweet {
    fn text(&self) -> &str {
        &self.text
    }
}

/// Fixed fallback stream, one tweet every 15 minutes going back from `now`
pub fn mock_tweets(now: DateTime<Utc>) -> Vec<Tweet> {
    MOCK_TWEETS
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let created_at = now - Duration::minutes(i as i64 * 15);
            Tweet {
                text: text.to_string(),
                author_id: format!("user_{}", i + 1),
                created_at: Some(created_at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()),
                time: time_label(created_at),
                is_mock: true,
            }
        })
        .collect()
}

/// Four-tier reading of the hype meter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HypeLevel {
    #[serde(rename = "Very Hyped")]
    VeryHyped,
    Hyped,
    Neutral,
    Bearish,
}

impl HypeLevel {
    pub fn from_meter(meter: u8) -> Self {
        if meter >= 70 {
            HypeLevel::VeryHyped
        } else if meter >= 50 {
            HypeLevel::Hyped
        } else if meter >= 30 {
            HypeLevel::Neutral
        } else {
            HypeLevel::Bearish
        }
    }
}

/// Hype meter: `clamp(round((overall + 1) * 50), 0, 100)`
pub fn hype_meter(overall_score: f64) -> u8 {
    ((overall_score + 1.0) * 50.0).round().clamp(0.0, 100.0) as u8
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HypeMetrics {
    pub hype_meter: u8,
    pub hype_level: HypeLevel,
}

/// Tweets add the 0-100 hype meter
pub struct TweetPolicy;

pub type TweetSentiment = AggregateResult<Tweet, NoMetrics, HypeMetrics>;

impl FamilyPolicy for TweetPolicy {
    type Item = Tweet;
    type ItemMetrics = NoMetrics;
    type Metrics = HypeMetrics;

    fn family(&self) -> &'static str {
        "tweet"
    }

    fn item_metrics(&self, _item: &Tweet, _raw_score: f64) -> NoMetrics {
        NoMetrics {}
    }

    fn metrics(&self, _items: &[ScoredItem<Tweet, NoMetrics>], overall_score: f64) -> HypeMetrics {
        let meter = hype_meter(overall_score);
        HypeMetrics {
            hype_meter: meter,
            hype_level: HypeLevel::from_meter(meter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::StaticScorer;
    use crate::sentiment::SentimentAggregator;
    use std::sync::Arc;

    #[test]
    fn test_hype_meter_anchors() {
        assert_eq!(hype_meter(-1.0), 0);
        assert_eq!(hype_meter(0.0), 50);
        assert_eq!(hype_meter(1.0), 100);
        assert_eq!(hype_meter(0.4), 70);
    }

    #[test]
    fn test_hype_levels() {
        assert_eq!(HypeLevel::from_meter(100), HypeLevel::VeryHyped);
        assert_eq!(HypeLevel::from_meter(70), HypeLevel::VeryHyped);
        assert_eq!(HypeLevel::from_meter(69), HypeLevel::Hyped);
        assert_eq!(HypeLevel::from_meter(50), HypeLevel::Hyped);
        assert_eq!(HypeLevel::from_meter(30), HypeLevel::Neutral);
        assert_eq!(HypeLevel::from_meter(29), HypeLevel::Bearish);
        assert_eq!(HypeLevel::from_meter(0), HypeLevel::Bearish);
    }

    #[test]
    fn test_hype_level_serialization() {
        assert_eq!(serde_json::to_value(HypeLevel::VeryHyped).unwrap(), "Very Hyped");
        assert_eq!(serde_json::to_value(HypeLevel::Bearish).unwrap(), "Bearish");
    }

    #[test]
    fn test_mock_stream() {
        let now = Utc::now();
        let tweets = mock_tweets(now);

        assert_eq!(tweets.len(), 10);
        assert!(tweets.iter().all(|t| t.is_mock));
        assert_eq!(tweets[0].author_id, "user_1");
        assert_eq!(tweets[9].author_id, "user_10");
        assert_eq!(tweets[0].time, time_label(now));
    }

    #[test]
    fn test_live_tweet_time_label() {
        let tweet = Tweet::live(
            "gm".to_string(),
            Some("42".to_string()),
            Some("2024-01-10T12:30:00.000Z".to_string()),
        );
        assert!(!tweet.is_mock);
        assert_eq!(tweet.time.len(), 5);

        let tweet = Tweet::live("gm".to_string(), None, Some("yesterday".to_string()));
        assert_eq!(tweet.time, "Now");
        assert_eq!(tweet.author_id, "unknown");
    }

    #[test]
    fn test_tweet_policy_metrics() {
        let aggregator = SentimentAggregator::new(Arc::new(StaticScorer::new(0.5)));
        let result = aggregator.aggregate(&TweetPolicy, mock_tweets(Utc::now()));

        assert_eq!(result.metrics.hype_meter, 75);
        assert_eq!(result.metrics.hype_level, HypeLevel::VeryHyped);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["hype_meter"], 75);
        assert_eq!(json["items"][0]["is_mock"], true);
    }

    #[test]
    fn test_empty_stream_hype_is_midpoint() {
        let aggregator = SentimentAggregator::new(Arc::new(StaticScorer::new(0.5)));
        let result = aggregator.aggregate(&TweetPolicy, Vec::new());
        assert_eq!(result.metrics.hype_meter, 50);
        assert_eq!(result.metrics.hype_level, HypeLevel::Hyped);
    }
}
