//! Property tests for the sentiment invariants.
//!
//! Uses proptest to verify:
//! 1. Classification matches the closed ±0.05 deadband
//! 2. Counts always add up and the overall score is the mean
//! 3. Hype meter is bounded and monotonic
//! 4. Signal confidence stays within 10..=95

use proptest::prelude::*;
use research_agents::families::{confidence_score, hype_meter, Post, PostPolicy};
use research_agents::{classify, Label, Scorer, SentimentAggregator};
use std::sync::Arc;

/// Scores a post by parsing its text as a float
struct ParsingScorer;

impl Scorer for ParsingScorer {
    fn score(&self, text: &str) -> f64 {
        text.parse().unwrap_or(0.0)
    }
}

fn arb_score() -> impl Strategy<Value = f64> {
    -1.0..=1.0_f64
}

proptest! {
    #[test]
    fn classification_follows_deadband(score in arb_score()) {
        let label = classify(score);
        prop_assert_eq!(label == Label::Positive, score >= 0.05);
        prop_assert_eq!(label == Label::Negative, score <= -0.05);
        prop_assert_eq!(label == Label::Neutral, score > -0.05 && score < 0.05);
    }

    #[test]
    fn counts_sum_and_mean(scores in prop::collection::vec(arb_score(), 1..40)) {
        let posts: Vec<Post> = scores.iter().map(|s| Post { text: s.to_string() }).collect();
        let aggregator = SentimentAggregator::new(Arc::new(ParsingScorer));
        let result = aggregator.aggregate(&PostPolicy, posts);

        let counts = result.counts;
        prop_assert_eq!(counts.total, scores.len());
        prop_assert_eq!(counts.positive + counts.negative + counts.neutral, counts.total);

        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        prop_assert!((result.overall_score - mean).abs() <= 0.0005 + 1e-9);
        prop_assert_eq!(result.overall_label, classify(mean));
    }

    #[test]
    fn hype_meter_bounded_and_monotonic(a in arb_score(), b in arb_score()) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(hype_meter(low) <= hype_meter(high));
        prop_assert!(hype_meter(a) <= 100);
    }

    #[test]
    fn confidence_within_bounds(score in arb_score()) {
        let confidence = confidence_score(score);
        prop_assert!((10..=95).contains(&confidence));
    }
}
