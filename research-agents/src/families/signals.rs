use crate::sentiment::{AggregateResult, FamilyPolicy, ScoredItem, TextItem};
use common::round_to;
use serde::{Deserialize, Serialize};

/// Kind of trading signal posted in a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalType {
    Buy,
    Sell,
    Alert,
    Info,
}

/// Signal message posted in a trading channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingSignal {
    pub text: String,
    pub channel: String,
    pub signal_type: SignalType,
    pub asset: String,
    pub entry_price: f64,
    pub time_ago: String,
}

impl TextItem for TradingSignal {
    fn text(&self) -> &str {
        &self.text
    }
}

/// Signal channel being followed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    pub members: String,
    pub status: String,
}

/// Per-signal confidence, 10 to 95
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignalConfidence {
    pub confidence_score: u8,
}

/// Confidence: `clamp(round((|raw| + 0.2) * 80), 10, 95)`
pub fn confidence_score(raw_score: f64) -> u8 {
    ((raw_score.abs() + 0.2) * 80.0).round().clamp(10.0, 95.0) as u8
}

/// Direction implied by buy vs sell signal counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketBias {
    Bullish,
    Bearish,
    Neutral,
}

impl MarketBias {
    pub fn from_counts(buy_signals: usize, sell_signals: usize) -> Self {
        match buy_signals.cmp(&sell_signals) {
            std::cmp::Ordering::Greater => MarketBias::Bullish,
            std::cmp::Ordering::Less => MarketBias::Bearish,
            std::cmp::Ordering::Equal => MarketBias::Neutral,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MarketBias::Bullish => "More buy signals detected",
            MarketBias::Bearish => "More sell signals detected",
            MarketBias::Neutral => "Balanced market",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalMetrics {
    pub market_bias: MarketBias,
    pub bias_description: &'static str,
    /// Mean confidence, 1 decimal; 0 for no signals
    pub avg_confidence: f64,
    pub buy_signals: usize,
    pub sell_signals: usize,
    /// Alert and info signals
    pub alert_signals: usize,
}

/// Trading signals add per-item confidence and a count-based market bias
pub struct SignalPolicy;

pub type SignalSentiment = AggregateResult<TradingSignal, SignalConfidence, SignalMetrics>;

impl FamilyPolicy for SignalPolicy {
    type Item = TradingSignal;
    type ItemMetrics = SignalConfidence;
    type Metrics = SignalMetrics;

    fn family(&self) -> &'static str {
        "signal"
    }

    fn item_metrics(&self, _item: &TradingSignal, raw_score: f64) -> SignalConfidence {
        SignalConfidence {
            confidence_score: confidence_score(raw_score),
        }
    }

    fn metrics(
        &self,
        items: &[ScoredItem<TradingSignal, SignalConfidence>],
        _overall_score: f64,
    ) -> SignalMetrics {
        let count = |kinds: &[SignalType]| {
            items
                .iter()
                .filter(|s| kinds.contains(&s.item.signal_type))
                .count()
        };

        let buy_signals = count(&[SignalType::Buy]);
        let sell_signals = count(&[SignalType::Sell]);
        let alert_signals = count(&[SignalType::Alert, SignalType::Info]);

        let avg_confidence = if items.is_empty() {
            0.0
        } else {
            let total: f64 = items.iter().map(|s| s.metrics.confidence_score as f64).sum();
            round_to(total / items.len() as f64, 1)
        };

        let market_bias = MarketBias::from_counts(buy_signals, sell_signals);

        SignalMetrics {
            market_bias,
            bias_description: market_bias.description(),
            avg_confidence,
            buy_signals,
            sell_signals,
            alert_signals,
        }
    }
}

/// Channels the signal feed follows
pub fn curated_channels() -> Vec<Channel> {
    [
        ("Crypto Whales 🐋", "45.2K"),
        ("Pump Signals 🚀", "23.8K"),
        ("DeFi Alerts 🌐", "18.5K"),
        ("Whale Movements", "67.1K"),
        ("Technical Analysis", "31.4K"),
    ]
    .into_iter()
    .map(|(name, members)| Channel {
        name: name.to_string(),
        members: members.to_string(),
        status: "active".to_string(),
    })
    .collect()
}

/// Most recent signals across the followed channels, newest first
pub fn curated_signals() -> Vec<TradingSignal> {
    [
        (
            "🟢 BUY SIGNAL: Bitcoin (BTC) - Strong bullish momentum detected! Entry: $44,500",
            "Crypto Whales 🐋",
            SignalType::Buy,
            "BTC",
            44500.0,
            "2 min",
        ),
        (
            "🔴 SELL ALERT: Ethereum showing weakness. Consider taking profits at $2,650",
            "Technical Analysis",
            SignalType::Sell,
            "ETH",
            2650.0,
            "5 min",
        ),
        (
            "🐋 WHALE ALERT: 1,000 BTC moved to exchange. Possible dump incoming!",
            "Whale Movements",
            SignalType::Alert,
            "BTC",
            44200.0,
            "8 min",
        ),
        (
            "🚀 PUMP DETECTED: Solana (SOL) breaking resistance! Quick scalp opportunity",
            "Pump Signals 🚀",
            SignalType::Buy,
            "SOL",
            98.50,
            "12 min",
        ),
        (
            "🌐 DeFi UPDATE: Uniswap (UNI) governance proposal passed. Bullish for UNI",
            "DeFi Alerts 🌐",
            SignalType::Info,
            "UNI",
            7.25,
            "15 min",
        ),
        (
            "⚠️ RISK WARNING: High volatility expected in next 2 hours. Manage positions carefully",
            "Technical Analysis",
            SignalType::Alert,
            "MARKET",
            0.0,
            "18 min",
        ),
        (
            "💰 ARBITRAGE OPPORTUNITY: Price difference detected between exchanges for ADA",
            "Crypto Whales 🐋",
            SignalType::Buy,
            "ADA",
            0.52,
            "22 min",
        ),
    ]
    .into_iter()
    .map(|(text, channel, signal_type, asset, entry_price, time_ago)| TradingSignal {
        text: text.to_string(),
        channel: channel.to_string(),
        signal_type,
        asset: asset.to_string(),
        entry_price,
        time_ago: time_ago.to_string(),
    })
    .collect()
}
