//! Compound polarity scoring
//!
//! The aggregators only need `score(text) -> [-1, 1]`. The live implementation
//! wraps VADER; tests use `StaticScorer` so results are deterministic.

use std::collections::HashMap;
use vader_sentiment::SentimentIntensityAnalyzer;

/// Maps a short text to a compound polarity in [-1.0, 1.0]
pub trait Scorer: Send + Sync {
    fn score(&self, text: &str) -> f64;
}

/// VADER compound score, tuned for social media and headlines
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer for VaderScorer {
    fn score(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }

        let scores = self.analyzer.polarity_scores(text);
        scores.get("compound").copied().unwrap_or(0.0).clamp(-1.0, 1.0)
    }
}

/// Fixed text-to-score table; unknown texts score `default`
#[derive(Debug, Clone, Default)]
pub struct StaticScorer {
    scores: HashMap<String, f64>,
    default: f64,
}

impl StaticScorer {
    pub fn new(default: f64) -> Self {
        Self {
            scores: HashMap::new(),
            default,
        }
    }

    pub fn with(mut self, text: &str, score: f64) -> Self {
        self.scores.insert(text.to_string(), score);
        self
    }
}

impl Scorer for StaticScorer {
    fn score(&self, text: &str) -> f64 {
        self.scores.get(text).copied().unwrap_or(self.default)
    }
}
