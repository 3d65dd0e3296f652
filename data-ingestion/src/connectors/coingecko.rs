use async_trait::async_trait;
use common::{round_to, PricePoint, PriceSnapshot, Unavailable, UpstreamResult};
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

use super::fetch_json;
use crate::sources::PriceSource;

/// CoinGecko public API connector
/// Serves current snapshots and the one-day hourly chart
pub struct CoinGeckoConnector {
    base_url: String,
    client: Client,
    snapshot_timeout: Duration,
    chart_timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct CoinResponse {
    name: String,
    symbol: String,
    market_data: MarketData,
    #[serde(default)]
    image: Option<CoinImage>,
}

#[derive(Debug, Deserialize)]
struct MarketData {
    current_price: UsdQuote,
    price_change_percentage_24h: f64,
    market_cap: UsdQuote,
    total_volume: UsdQuote,
    high_24h: UsdQuote,
    low_24h: UsdQuote,
}

#[derive(Debug, Deserialize)]
struct UsdQuote {
    usd: f64,
}

#[derive(Debug, Deserialize)]
struct CoinImage {
    small: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<(f64, f64)>,
}

impl CoinGeckoConnector {
    pub fn new(base_url: &str, snapshot_timeout: Duration, chart_timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            client: Client::new(),
            snapshot_timeout,
            chart_timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL extended by `segments`, each percent-encoded as a single
    /// path segment
    fn endpoint(&self, resource: &str, segments: &[&str]) -> UpstreamResult<Url> {
        let invalid = || Unavailable::NotConfigured {
            resource: format!("{} (base url {})", resource, self.base_url),
        };

        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn into_snapshot(asset_id: &str, coin: CoinResponse) -> PriceSnapshot {
    let market = coin.market_data;
    PriceSnapshot {
        id: asset_id.to_string(),
        name: coin.name,
        symbol: coin.symbol.to_uppercase(),
        price: market.current_price.usd,
        change_24h: round_to(market.price_change_percentage_24h, 2),
        market_cap: market.market_cap.usd,
        volume_24h: market.total_volume.usd,
        high_24h: market.high_24h.usd,
        low_24h: market.low_24h.usd,
        image: coin.image.and_then(|i| i.small),
        is_fallback: false,
    }
}

/// Whole-millisecond timestamps only; anything else would saturate or
/// truncate in the cast
fn into_points(chart: MarketChartResponse, resource: &str) -> UpstreamResult<Vec<PricePoint>> {
    const MAX_MS: f64 = 9_007_199_254_740_992.0; // 2^53

    chart
        .prices
        .into_iter()
        .enumerate()
        .map(|(i, (ts, price))| {
            if !ts.is_finite() || ts.fract() != 0.0 || ts.abs() > MAX_MS {
                return Err(Unavailable::malformed(
                    resource,
                    format!("invalid timestamp {} at index {}", ts, i),
                ));
            }
            Ok(PricePoint::new(ts as i64, price))
        })
        .collect()
}

#[async_trait]
impl PriceSource for CoinGeckoConnector {
    async fn fetch_snapshot(&self, asset_id: &str) -> UpstreamResult<PriceSnapshot> {
        let resource = format!("coingecko:coin:{}", asset_id);
        let url = self.endpoint(&resource, &["coins", asset_id])?;

        let request = self.client.get(url).query(&[
            ("localization", "false"),
            ("tickers", "false"),
            ("community_data", "false"),
            ("developer_data", "false"),
        ]);

        let coin: CoinResponse = fetch_json(request, &resource, self.snapshot_timeout).await?;
        info!("Fetched {} snapshot from CoinGecko", asset_id);

        Ok(into_snapshot(asset_id, coin))
    }

    async fn fetch_price_series(&self, asset_id: &str) -> UpstreamResult<Vec<PricePoint>> {
        let resource = format!("coingecko:market_chart:{}", asset_id);
        let url = self.endpoint(&resource, &["coins", asset_id, "market_chart"])?;

        let request = self.client.get(url).query(&[
            ("vs_currency", "usd"),
            ("days", "1"),
            ("interval", "hourly"),
        ]);

        let chart: MarketChartResponse = fetch_json(request, &resource, self.chart_timeout).await?;
        let points = into_points(chart, &resource)?;
        info!("Fetched {} price points for {} from CoinGecko", points.len(), asset_id);

        Ok(points)
    }
}
