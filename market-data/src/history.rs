//! Sentiment-annotated price history
//!
//! Each point after the first carries a sentiment derived from its percent
//! change against the previous point:
//!
//! | change `d` (%)  | sentiment               |
//! |-----------------|-------------------------|
//! | `d > 0.5`       | `min(0.8, 0.2 + d/10)`  |
//! | `d < -0.5`      | `max(-0.8, -0.2 + d/10)`|
//! | otherwise       | `d / 20`                |
//!
//! The first point has sentiment 0.

use chrono::{DateTime, Utc};
use common::{round_to, time_label, HistoryPoint, PricePoint, Unavailable, UpstreamResult};

const RESOURCE: &str = "price_series";

/// Reject series the history rule cannot run on
pub fn validate_series(points: &[PricePoint]) -> UpstreamResult<()> {
    if points.is_empty() {
        return Err(Unavailable::malformed(RESOURCE, "empty series"));
    }

    for (i, point) in points.iter().enumerate() {
        if !point.price.is_finite() {
            return Err(Unavailable::malformed(
                RESOURCE,
                format!("non-finite price at index {}", i),
            ));
        }
        if DateTime::<Utc>::from_timestamp_millis(point.timestamp_ms).is_none() {
            return Err(Unavailable::malformed(
                RESOURCE,
                format!("timestamp out of range at index {}", i),
            ));
        }
    }

    for (i, pair) in points.windows(2).enumerate() {
        if pair[0].price <= 0.0 {
            return Err(Unavailable::malformed(
                RESOURCE,
                format!("non-positive price at index {}", i),
            ));
        }
        if pair[1].timestamp_ms < pair[0].timestamp_ms {
            return Err(Unavailable::malformed(
                RESOURCE,
                format!("series out of order at index {}", i + 1),
            ));
        }
    }

    Ok(())
}

/// Unrounded sentiment of a move from `previous` to `price`
pub fn point_sentiment(previous: f64, price: f64) -> f64 {
    let change_pct = (price - previous) / previous * 100.0;

    if change_pct > 0.5 {
        (0.2 + change_pct / 10.0).min(0.8)
    } else if change_pct < -0.5 {
        (-0.2 + change_pct / 10.0).max(-0.8)
    } else {
        change_pct / 20.0
    }
}

/// Annotate a validated series with per-point sentiment
pub fn build_history(points: &[PricePoint]) -> Vec<HistoryPoint> {
    let mut previous: Option<f64> = None;

    points
        .iter()
        .map(|point| {
            let sentiment = match previous {
                Some(prev) => point_sentiment(prev, point.price),
                None => 0.0,
            };
            previous = Some(point.price);

            let timestamp = DateTime::<Utc>::from_timestamp_millis(point.timestamp_ms)
                .unwrap_or_default();

            HistoryPoint {
                time_label: time_label(timestamp),
                timestamp,
                price: round_to(point.price, 2),
                sentiment: round_to(sentiment, 3),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR_MS: i64 = 3_600_000;

    fn series(prices: &[f64]) -> Vec<PricePoint> {
        let start = 1_704_067_200_000; // 2024-01-01T00:00:00Z
        prices
            .iter()
            .enumerate()
            .map(|(i, price)| PricePoint::new(start + i as i64 * HOUR_MS, *price))
            .collect()
    }

    #[test]
    fn test_history_rule() {
        let history = build_history(&series(&[100.0, 102.0, 101.0]));

        assert_eq!(history.len(), 3);
        assert_eq!(history[0].sentiment, 0.0);
        assert_eq!(history[1].sentiment, 0.4);
        // -0.98% => -0.2 - 0.098
        assert_eq!(history[2].sentiment, -0.298);
        assert_eq!(history[2].price, 101.0);
    }

    #[test]
    fn test_small_moves_are_scaled() {
        // +0.2% => 0.01
        let history = build_history(&series(&[1000.0, 1002.0]));
        assert_eq!(history[1].sentiment, 0.01);
    }

    #[test]
    fn test_large_moves_are_capped() {
        let history = build_history(&series(&[100.0, 200.0, 50.0]));
        assert_eq!(history[1].sentiment, 0.8);
        assert_eq!(history[2].sentiment, -0.8);
    }

    #[test]
    fn test_inside_band() {
        assert!((point_sentiment(100.0, 100.4) - 0.02).abs() < 1e-9);
        assert!((point_sentiment(100.0, 99.6) + 0.02).abs() < 1e-9);
        assert!((point_sentiment(100.0, 101.0) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_timestamps_and_rounding() {
        let history = build_history(&series(&[43123.456, 43200.0]));

        assert_eq!(history[0].price, 43123.46);
        assert_eq!(history[0].timestamp.timestamp_millis(), 1_704_067_200_000);
        assert_eq!(history[1].timestamp - history[0].timestamp, chrono::Duration::hours(1));
        assert_eq!(history[0].time_label.len(), 5);
    }

    #[test]
    fn test_single_point() {
        let history = build_history(&series(&[50.0]));
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].sentiment, 0.0);
    }

    #[test]
    fn test_validate_series() {
        assert!(validate_series(&series(&[100.0, 102.0, 101.0])).is_ok());
        assert!(validate_series(&series(&[0.0])).is_ok());

        assert!(matches!(validate_series(&[]), Err(Unavailable::Malformed { .. })));
        assert!(validate_series(&series(&[100.0, f64::NAN])).is_err());
        assert!(validate_series(&series(&[100.0, f64::INFINITY])).is_err());
        assert!(validate_series(&series(&[0.0, 10.0])).is_err());
        assert!(validate_series(&series(&[-5.0, 10.0])).is_err());

        let mut reversed = series(&[100.0, 101.0]);
        reversed.reverse();
        assert!(validate_series(&reversed).is_err());
    }
}
