//! Synthetic price/sentiment series
//!
//! A bounded random walk served when the live chart is unavailable. Price
//! moves up to ±2% per hour from 43,000; sentiment moves up to ±0.1 from 0.2
//! and stays inside [-1, 1]. The last point is stamped at the current time.

use crate::clock::{Clock, SystemClock};
use chrono::Duration;
use common::{round_to, time_label, HistoryPoint};
use std::sync::{Arc, Mutex};

pub const BASE_PRICE: f64 = 43_000.0;
pub const BASE_SENTIMENT: f64 = 0.2;

const MAX_PRICE_STEP: f64 = 0.02;
const MAX_SENTIMENT_STEP: f64 = 0.1;

pub struct SyntheticGenerator {
    rng: Mutex<fastrand::Rng>,
    clock: Arc<dyn Clock>,
}

impl SyntheticGenerator {
    pub fn new() -> Self {
        Self::from_rng(fastrand::Rng::new(), Arc::new(SystemClock))
    }

    /// Deterministic generator for reproducible series
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(fastrand::Rng::with_seed(seed), Arc::new(SystemClock))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn from_rng(rng: fastrand::Rng, clock: Arc<dyn Clock>) -> Self {
        Self {
            rng: Mutex::new(rng),
            clock,
        }
    }

    /// `hours` hourly points ending at now
    pub fn generate_series(&self, hours: usize) -> Vec<HistoryPoint> {
        let now = self.clock.now();
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        let mut price = BASE_PRICE;
        let mut sentiment = BASE_SENTIMENT;
        let mut series = Vec::with_capacity(hours);

        for i in 0..hours {
            price *= 1.0 + uniform(&mut rng, MAX_PRICE_STEP);
            sentiment = (sentiment + uniform(&mut rng, MAX_SENTIMENT_STEP)).clamp(-1.0, 1.0);

            let timestamp = now - Duration::hours((hours - 1 - i) as i64);
            series.push(HistoryPoint {
                time_label: time_label(timestamp),
                timestamp,
                price: round_to(price, 2),
                sentiment: round_to(sentiment, 3),
            });
        }

        series
    }
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniform draw from `[-bound, bound)`
fn uniform(rng: &mut fastrand::Rng, bound: f64) -> f64 {
    (rng.f64() * 2.0 - 1.0) * bound
}
