//! Shared types for the crypto sentiment dashboard
//!
//! Every crate in the workspace depends on this one for:
//! - The market data shapes handed between layers (`PriceSnapshot`, `HistoryPoint`)
//! - The `Unavailable` error returned by upstream adapters
//! - Rounding helpers so every layer rounds the same way

pub mod error;
pub mod types;

pub use error::{Unavailable, UpstreamResult};
pub use types::{asset_label, round_to, time_label, HistoryPoint, PricePoint, PriceSnapshot};
