//! Market data processing for the dashboard
//!
//! This crate provides:
//! - A time-windowed cache keyed by resource, with an injectable clock
//! - The history aggregator that annotates a price series with sentiment
//! - The synthetic series generator used when live prices are unavailable

pub mod cache;
pub mod clock;
pub mod history;
pub mod synthetic;

pub use cache::TimedCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use history::{build_history, point_sentiment, validate_series};
pub use synthetic::{SyntheticGenerator, BASE_PRICE, BASE_SENTIMENT};
