//! Generic sentiment aggregation
//!
//! Every item family (posts, headlines, tweets, trading signals) runs the
//! same pipeline:
//! - Score each item's text with the injected `Scorer`
//! - Classify it with the ±0.05 deadband
//! - Tally counts and average the raw scores
//! - Let the family policy derive its own indices
//!
//! Families only differ in their `FamilyPolicy`, so thresholds and rounding
//! live here once.

use crate::classifier::{classify, Label};
use crate::scorer::Scorer;
use common::round_to;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Anything with text to score
pub trait TextItem {
    fn text(&self) -> &str;
}

/// Placeholder for families that derive no extra metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NoMetrics {}

/// Family-specific part of the aggregation
pub trait FamilyPolicy {
    type Item: TextItem + Serialize;
    type ItemMetrics: Serialize;
    type Metrics: Serialize;

    /// Short family name used in logs
    fn family(&self) -> &'static str;

    /// Per-item derived fields, computed from the raw score
    fn item_metrics(&self, item: &Self::Item, raw_score: f64) -> Self::ItemMetrics;

    /// Family indices, computed once all items are scored
    fn metrics(
        &self,
        items: &[ScoredItem<Self::Item, Self::ItemMetrics>],
        overall_score: f64,
    ) -> Self::Metrics;
}

/// One scored and classified item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredItem<T, M> {
    #[serde(flatten)]
    pub item: T,
    #[serde(skip)]
    pub raw_score: f64,
    pub score: f64, // raw score, 3 decimals
    pub label: Label,
    /// `label` as 1, 0 or -1
    pub category: i8,
    #[serde(flatten)]
    pub metrics: M,
}

/// Label tallies; `positive + negative + neutral == total`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub total: usize,
}

impl Counts {
    fn tally<T, M>(items: &[ScoredItem<T, M>]) -> Self {
        let mut counts = Counts {
            total: items.len(),
            ..Counts::default()
        };

        for item in items {
            match item.label {
                Label::Positive => counts.positive += 1,
                Label::Negative => counts.negative += 1,
                Label::Neutral => counts.neutral += 1,
            }
        }

        counts
    }
}

/// Aggregated view over one family of items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult<T, IM, M> {
    pub items: Vec<ScoredItem<T, IM>>,
    pub overall_label: Label,
    /// Mean raw score, 3 decimals; 0 for empty input
    pub overall_score: f64,
    pub counts: Counts,
    #[serde(flatten)]
    pub metrics: M,
}

/// Shared aggregation pipeline
#[derive(Clone)]
pub struct SentimentAggregator {
    scorer: Arc<dyn Scorer>,
}

impl SentimentAggregator {
    pub fn new(scorer: Arc<dyn Scorer>) -> Self {
        Self { scorer }
    }

    /// Score, classify and aggregate a collection of items
    pub fn aggregate<P: FamilyPolicy>(
        &self,
        policy: &P,
        items: Vec<P::Item>,
    ) -> AggregateResult<P::Item, P::ItemMetrics, P::Metrics> {
        let scored: Vec<ScoredItem<P::Item, P::ItemMetrics>> = items
            .into_iter()
            .map(|item| {
                let raw_score = self.scorer.score(item.text());
                let metrics = policy.item_metrics(&item, raw_score);
                let label = classify(raw_score);
                ScoredItem {
                    item,
                    raw_score,
                    score: round_to(raw_score, 3),
                    label,
                    category: label.category(),
                    metrics,
                }
            })
            .collect();

        let counts = Counts::tally(&scored);

        // Empty input is neutral, not a division by zero
        let overall_score = if scored.is_empty() {
            0.0
        } else {
            scored.iter().map(|s| s.raw_score).sum::<f64>() / scored.len() as f64
        };

        let metrics = policy.metrics(&scored, overall_score);

        debug!(
            "Aggregated {} {} items: mean {:.3}, +{} -{} ={}",
            counts.total,
            policy.family(),
            overall_score,
            counts.positive,
            counts.negative,
            counts.neutral
        );

        AggregateResult {
            items: scored,
            overall_label: classify(overall_score),
            overall_score: round_to(overall_score, 3),
            counts,
            metrics,
        }
    }
}
