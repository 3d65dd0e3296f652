//! Dashboard configuration
//!
//! Layered as built-in defaults, then an optional TOML file, then
//! `DASHBOARD__`-prefixed environment variables
//! (`DASHBOARD__SERVER__PORT=9000`, `DASHBOARD__CACHE__PRICE_WINDOW_SECS=30`).
//!
//! Integration credentials are read separately from their deployment names.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub server: ServerCfg,
    pub upstream: UpstreamCfg,
    pub cache: CacheCfg,
    pub feeds: FeedsCfg,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerCfg {
    pub host: String,
    pub port: u16,
}

impl Default for ServerCfg {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ServerCfg {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamCfg {
    pub coingecko_url: String,
    pub twitter_url: String,
    pub price_timeout_secs: u64,
    pub chart_timeout_secs: u64,
    pub tweet_timeout_secs: u64,
}

impl Default for UpstreamCfg {
    fn default() -> Self {
        Self {
            coingecko_url: "https://api.coingecko.com/api/v3".to_string(),
            twitter_url: "https://api.twitter.com".to_string(),
            price_timeout_secs: 5,
            chart_timeout_secs: 10,
            tweet_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheCfg {
    pub price_window_secs: u64,
    pub history_window_secs: u64,
}

impl Default for CacheCfg {
    fn default() -> Self {
        Self {
            price_window_secs: 10,
            history_window_secs: 300,
        }
    }
}

impl CacheCfg {
    pub fn price_window(&self) -> Duration {
        Duration::from_secs(self.price_window_secs)
    }

    pub fn history_window(&self) -> Duration {
        Duration::from_secs(self.history_window_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedsCfg {
    /// Asset shown on the index page and the refresh endpoint
    pub default_asset: String,
    pub synthetic_hours: usize,
    pub post_count: usize,
}

impl Default for FeedsCfg {
    fn default() -> Self {
        Self {
            default_asset: "bitcoin".to_string(),
            synthetic_hours: 24,
            post_count: 10,
        }
    }
}

impl DashboardConfig {
    /// Load from `path` (optional) and the environment
    pub fn load(path: &str) -> Result<Self> {
        let cfg = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("DASHBOARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("building config")?;

        let dashboard: DashboardConfig = cfg.try_deserialize().context("deserializing config")?;
        dashboard.validate()?;
        Ok(dashboard)
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.upstream.coingecko_url.is_empty(), "upstream.coingecko_url missing");
        anyhow::ensure!(!self.upstream.twitter_url.is_empty(), "upstream.twitter_url missing");
        anyhow::ensure!(
            self.upstream.price_timeout_secs > 0
                && self.upstream.chart_timeout_secs > 0
                && self.upstream.tweet_timeout_secs > 0,
            "upstream timeouts must be > 0"
        );
        anyhow::ensure!(!self.feeds.default_asset.is_empty(), "feeds.default_asset missing");
        anyhow::ensure!(self.feeds.synthetic_hours > 0, "feeds.synthetic_hours must be > 0");
        anyhow::ensure!(self.feeds.post_count > 0, "feeds.post_count must be > 0");
        Ok(())
    }
}

/// Integration credentials; blank values count as absent
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub steady_api_key: Option<String>,
    pub twitter_bearer_token: Option<String>,
    pub telegram_api_id: Option<String>,
    pub telegram_phone: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            steady_api_key: read("STEADY_API_KEY"),
            twitter_bearer_token: read("TWITTER_BEARER_TOKEN"),
            telegram_api_id: read("TELEGRAM_API_ID"),
            telegram_phone: read("TELEGRAM_PHONE"),
        }
    }

    pub fn steady_configured(&self) -> bool {
        self.steady_api_key.is_some()
    }

    /// Telegram needs both the API id and the phone number
    pub fn telegram_configured(&self) -> bool {
        self.telegram_api_id.is_some() && self.telegram_phone.is_some()
    }
}
