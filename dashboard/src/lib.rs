//! Crypto sentiment dashboard backend
//!
//! - `config`: layered settings and integration credentials
//! - `service`: cache, upstream, aggregation and fallback wiring
//! - `server`: axum routes over the service

pub mod config;
pub mod server;
pub mod service;

pub use config::{Credentials, DashboardConfig};
pub use server::{router, serve, SharedService};
pub use service::{DashboardService, ServiceSettings};
