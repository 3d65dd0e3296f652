//! Request-facing service
//!
//! Wires the cache, the upstream sources, the aggregator and the fallback
//! generators together. Every method returns a well-formed payload; upstream
//! failures are logged and replaced by fallback data carrying a provenance
//! flag.

use crate::config::{Credentials, DashboardConfig};
use chrono::{DateTime, Utc};
use common::{asset_label, HistoryPoint, PriceSnapshot, Unavailable};
use data_ingestion::{CoinGeckoConnector, PriceSource, TweetSource, TwitterConnector};
use market_data::{build_history, validate_series, Clock, SyntheticGenerator, SystemClock, TimedCache};
use research_agents::families::{
    curated_channels, curated_headlines, curated_signals, mock_tweets, sample_posts, Channel,
    NewsPolicy, NewsSentiment, PostPolicy, PostSentiment, SignalPolicy, SignalSentiment, Tweet,
    TweetPolicy, TweetSentiment,
};
use research_agents::{Scorer, SentimentAggregator, VaderScorer};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Asset ids are CoinGecko slugs: lower-case ascii letters, digits and `-`
pub fn check_asset_id(asset_id: &str) -> Result<(), Unavailable> {
    let valid = !asset_id.is_empty()
        && asset_id.len() <= 64
        && asset_id
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');

    if valid {
        Ok(())
    } else {
        Err(Unavailable::malformed("asset_id", format!("rejected id {:?}", asset_id)))
    }
}

/// Tunables taken from the config file
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub price_window: Duration,
    pub history_window: Duration,
    pub default_asset: String,
    pub synthetic_hours: usize,
    pub post_count: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self::from(&DashboardConfig::default())
    }
}

impl From<&DashboardConfig> for ServiceSettings {
    fn from(cfg: &DashboardConfig) -> Self {
        Self {
            price_window: cfg.cache.price_window(),
            history_window: cfg.cache.history_window(),
            default_asset: cfg.feeds.default_asset.clone(),
            synthetic_hours: cfg.feeds.synthetic_hours,
            post_count: cfg.feeds.post_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryResponse {
    pub label: String,
    pub data: Vec<HistoryPoint>,
    /// Set when `data` is a synthetic series
    pub is_simulation: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsFeed {
    #[serde(flatten)]
    pub sentiment: NewsSentiment,
    pub api_key_used: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TweetFeed {
    #[serde(flatten)]
    pub sentiment: TweetSentiment,
    pub api_success: bool,
    pub is_simulation: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalFeed {
    #[serde(flatten)]
    pub sentiment: SignalSentiment,
    pub channels: Vec<Channel>,
    pub telegram_configured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexPayload {
    pub crypto: PriceSnapshot,
    pub sentiment: PostSentiment,
    pub history: HistoryResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub uptime_secs: u64,
}

pub struct DashboardService {
    prices: Arc<dyn PriceSource>,
    tweets: Arc<dyn TweetSource>,
    aggregator: SentimentAggregator,
    snapshots: TimedCache<PriceSnapshot>,
    histories: TimedCache<Vec<HistoryPoint>>,
    synthetic: SyntheticGenerator,
    post_rng: Mutex<fastrand::Rng>,
    clock: Arc<dyn Clock>,
    credentials: Credentials,
    settings: ServiceSettings,
    started_at: Instant,
}

impl DashboardService {
    pub fn new(
        prices: Arc<dyn PriceSource>,
        tweets: Arc<dyn TweetSource>,
        scorer: Arc<dyn Scorer>,
        credentials: Credentials,
        settings: ServiceSettings,
    ) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        Self {
            prices,
            tweets,
            aggregator: SentimentAggregator::new(scorer),
            snapshots: TimedCache::with_clock(clock.clone()),
            histories: TimedCache::with_clock(clock.clone()),
            synthetic: SyntheticGenerator::new(),
            post_rng: Mutex::new(fastrand::Rng::new()),
            clock,
            credentials,
            settings,
            started_at: Instant::now(),
        }
    }

    /// Production wiring: CoinGecko, Twitter and VADER
    pub fn from_config(cfg: &DashboardConfig, credentials: Credentials) -> Self {
        let upstream = &cfg.upstream;

        let prices = CoinGeckoConnector::new(
            &upstream.coingecko_url,
            Duration::from_secs(upstream.price_timeout_secs),
            Duration::from_secs(upstream.chart_timeout_secs),
        );
        let tweets = TwitterConnector::new(
            &upstream.twitter_url,
            credentials.twitter_bearer_token.clone(),
            Duration::from_secs(upstream.tweet_timeout_secs),
        );

        info!(
            "Integrations: steady={} twitter={} telegram={}",
            credentials.steady_configured(),
            tweets.is_configured(),
            credentials.telegram_configured()
        );

        Self::new(
            Arc::new(prices),
            Arc::new(tweets),
            Arc::new(VaderScorer::new()),
            credentials,
            ServiceSettings::from(cfg),
        )
    }

    /// Drive caches and synthetic timestamps from `clock`. Clears both caches.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.snapshots = TimedCache::with_clock(clock.clone());
        self.histories = TimedCache::with_clock(clock.clone());
        self.synthetic = self.synthetic.with_clock(clock.clone());
        self.clock = clock;
        self
    }

    /// Reproducible post sampling and synthetic series
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.synthetic = SyntheticGenerator::with_seed(seed).with_clock(self.clock.clone());
        self.post_rng = Mutex::new(fastrand::Rng::with_seed(seed));
        self
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Cached live snapshot, or a zeroed fallback
    pub async fn price_snapshot(&self, asset_id: &str) -> PriceSnapshot {
        let fetched = match check_asset_id(asset_id) {
            Ok(()) => {
                let key = format!("price:{}", asset_id);
                self.snapshots
                    .get_or_try_compute(&key, self.settings.price_window, || {
                        self.prices.fetch_snapshot(asset_id)
                    })
                    .await
            }
            Err(e) => Err(e),
        };

        match fetched {
            Ok(snapshot) => snapshot.as_ref().clone(),
            Err(e) => {
                warn!("Using fallback price for {}: {}", asset_id, e);
                PriceSnapshot::fallback(asset_id)
            }
        }
    }

    /// Cached sentiment-annotated history, or a synthetic series
    pub async fn history(&self, asset_id: &str) -> HistoryResponse {
        let fetched = match check_asset_id(asset_id) {
            Ok(()) => {
                let key = format!("history:{}", asset_id);
                self.histories
                    .get_or_try_compute(&key, self.settings.history_window, || async {
                        let points = self.prices.fetch_price_series(asset_id).await?;
                        validate_series(&points)?;
                        Ok::<_, Unavailable>(build_history(&points))
                    })
                    .await
            }
            Err(e) => Err(e),
        };

        let (data, is_simulation) = match fetched {
            Ok(history) => (history.as_ref().clone(), false),
            Err(e) => {
                warn!("Using synthetic history for {}: {}", asset_id, e);
                (self.synthetic.generate_series(self.settings.synthetic_hours), true)
            }
        };

        HistoryResponse {
            label: asset_label(asset_id),
            data,
            is_simulation,
        }
    }

    /// Freshly sampled social posts
    pub fn post_sentiment(&self) -> PostSentiment {
        let posts = {
            let mut rng = self.post_rng.lock().unwrap_or_else(|e| e.into_inner());
            sample_posts(&mut rng, self.settings.post_count)
        };
        self.aggregator.aggregate(&PostPolicy, posts)
    }

    pub fn news(&self) -> NewsFeed {
        NewsFeed {
            sentiment: self.aggregator.aggregate(&NewsPolicy, curated_headlines(self.now())),
            api_key_used: self.credentials.steady_configured(),
        }
    }

    /// Live recent tweets, or the mock stream
    pub async fn tweets(&self) -> TweetFeed {
        let (tweets, api_success) = match self.tweets.fetch_recent().await {
            Ok(raw) => {
                let tweets: Vec<Tweet> = raw
                    .into_iter()
                    .map(|t| Tweet::live(t.text, t.author_id, t.created_at))
                    .collect();
                (tweets, true)
            }
            Err(e) => {
                warn!("Using mock tweets: {}", e);
                (mock_tweets(self.now()), false)
            }
        };

        TweetFeed {
            sentiment: self.aggregator.aggregate(&TweetPolicy, tweets),
            api_success,
            is_simulation: !api_success,
        }
    }

    pub fn signals(&self) -> SignalFeed {
        SignalFeed {
            sentiment: self.aggregator.aggregate(&SignalPolicy, curated_signals()),
            channels: curated_channels(),
            telegram_configured: self.credentials.telegram_configured(),
        }
    }

    /// Default asset snapshot, post sentiment and history, computed together
    pub async fn index(&self) -> IndexPayload {
        let asset = self.settings.default_asset.as_str();

        let (crypto, sentiment, history) = tokio::join!(
            self.price_snapshot(asset),
            async { self.post_sentiment() },
            self.history(asset),
        );

        IndexPayload {
            crypto,
            sentiment,
            history,
        }
    }

    pub fn health(&self) -> Health {
        Health {
            status: "ok",
            uptime_secs: self.started_at.elapsed().as_secs(),
        }
    }
}
