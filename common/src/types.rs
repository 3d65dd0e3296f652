use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Raw point from an upstream price series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp_ms: i64,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp_ms: i64, price: f64) -> Self {
        Self { timestamp_ms, price }
    }
}

/// One point of the sentiment-annotated price chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// Local wall clock label, `HH:MM`
    #[serde(rename = "time")]
    pub time_label: String,
    pub timestamp: DateTime<Utc>,
    pub price: f64,     // 2 decimals
    pub sentiment: f64, // -1.0 to 1.0, 3 decimals
}

/// Current market snapshot for one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub price: f64,
    pub change_24h: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub high_24h: f64,
    pub low_24h: f64,
    pub image: Option<String>,
    /// Set when the upstream was unavailable and the values are placeholders
    pub is_fallback: bool,
}

impl PriceSnapshot {
    /// Zeroed snapshot served when the price source is unavailable
    pub fn fallback(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: asset_label(id),
            symbol: id.chars().take(3).collect::<String>().to_uppercase(),
            price: 0.0,
            change_24h: 0.0,
            market_cap: 0.0,
            volume_24h: 0.0,
            high_24h: 0.0,
            low_24h: 0.0,
            image: None,
            is_fallback: true,
        }
    }
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Local wall clock label (`HH:MM`) for a timestamp
pub fn time_label(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}

/// Display name for an asset id
pub fn asset_label(id: &str) -> String {
    match id {
        "bitcoin" => "Bitcoin".to_string(),
        "ethereum" => "Ethereum".to_string(),
        "solana" => "Solana".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}
