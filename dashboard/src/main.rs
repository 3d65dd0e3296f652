use anyhow::Result;
use dashboard::{serve, Credentials, DashboardConfig, DashboardService};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    info!("🚀 Starting crypto sentiment dashboard");

    let config_path = std::env::var("DASHBOARD_CONFIG").unwrap_or_else(|_| "dashboard.toml".to_string());
    let cfg = DashboardConfig::load(&config_path)?;
    let addr = cfg.server.socket_addr()?;

    let service = DashboardService::from_config(&cfg, Credentials::from_env());
    serve(Arc::new(service), addr).await
}
