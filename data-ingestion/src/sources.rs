use async_trait::async_trait;
use common::{PricePoint, PriceSnapshot, UpstreamResult};

use crate::connectors::RawTweet;

/// Source of live market data for an asset
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Current price, volume and 24h range
    async fn fetch_snapshot(&self, asset_id: &str) -> UpstreamResult<PriceSnapshot>;

    /// Hourly price series for the last day, oldest first
    async fn fetch_price_series(&self, asset_id: &str) -> UpstreamResult<Vec<PricePoint>>;
}

/// Source of recent social-stream posts
#[async_trait]
pub trait TweetSource: Send + Sync {
    async fn fetch_recent(&self) -> UpstreamResult<Vec<RawTweet>>;
}
