//! Upstream adapters for market prices and social streams
//!
//! Each connector applies its own request timeout and collapses every
//! failure (network, timeout, status, missing field) into
//! `common::Unavailable`. Partially parsed payloads are never returned.

pub mod connectors;
pub mod sources;

pub use connectors::{CoinGeckoConnector, RawTweet, TwitterConnector};
pub use sources::{PriceSource, TweetSource};
