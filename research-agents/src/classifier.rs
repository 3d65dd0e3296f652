use serde::{Deserialize, Serialize};

/// Scores at or above this are positive
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Scores at or below this are negative
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Three-way sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Positive,
    Neutral,
    Negative,
}

impl Label {
    /// Numeric category: 1, 0 or -1
    pub fn category(self) -> i8 {
        match self {
            Label::Positive => 1,
            Label::Neutral => 0,
            Label::Negative => -1,
        }
    }
}

/// Classify a compound polarity using the closed ±0.05 deadband
pub fn classify(raw_score: f64) -> Label {
    if raw_score >= POSITIVE_THRESHOLD {
        Label::Positive
    } else if raw_score <= NEGATIVE_THRESHOLD {
        Label::Negative
    } else {
        Label::Neutral
    }
}
