//! Thin HTTP dispatcher over `DashboardService`
//!
//! Every route answers 200 with a JSON body; upstream trouble shows up as
//! provenance flags in the payload, never as an error status.

use crate::service::{DashboardService, HistoryResponse, IndexPayload, NewsFeed, SignalFeed, TweetFeed, Health};
use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    http::Method,
    routing::get,
    Json, Router,
};
use common::PriceSnapshot;
use research_agents::families::PostSentiment;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

pub type SharedService = Arc<DashboardService>;

pub fn router(service: SharedService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/refresh-sentiment", get(refresh_sentiment_handler))
        .route("/api/refresh-price", get(refresh_price_handler))
        .route("/api/crypto/{id}", get(crypto_handler))
        .route("/api/history/{id}", get(history_handler))
        .route("/dashboard/steady", get(steady_handler))
        .route("/dashboard/twitter", get(twitter_handler))
        .route("/dashboard/telegram", get(telegram_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(service)
}

/// Bind `addr` and serve until ctrl-c
pub async fn serve(service: SharedService, addr: SocketAddr) -> Result<()> {
    info!("Registering routes:");
    info!("  GET /");
    info!("  GET /health");
    info!("  GET /api/refresh-sentiment");
    info!("  GET /api/refresh-price");
    info!("  GET /api/crypto/{{id}}");
    info!("  GET /api/history/{{id}}");
    info!("  GET /dashboard/steady|twitter|telegram");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, "Server listening");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving http")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down gracefully...");
    }
}

/// GET / - snapshot, post sentiment and history for the default asset
pub async fn index_handler(State(service): State<SharedService>) -> Json<IndexPayload> {
    Json(service.index().await)
}

pub async fn health_handler(State(service): State<SharedService>) -> Json<Health> {
    Json(service.health())
}

/// GET /api/refresh-sentiment - newly sampled posts
pub async fn refresh_sentiment_handler(State(service): State<SharedService>) -> Json<PostSentiment> {
    Json(service.post_sentiment())
}

/// GET /api/refresh-price - default asset snapshot
pub async fn refresh_price_handler(State(service): State<SharedService>) -> Json<PriceSnapshot> {
    let asset = service.settings().default_asset.clone();
    Json(service.price_snapshot(&asset).await)
}

pub async fn crypto_handler(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Json<PriceSnapshot> {
    debug!("Price requested for {}", id);
    Json(service.price_snapshot(&id).await)
}

pub async fn history_handler(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Json<HistoryResponse> {
    debug!("History requested for {}", id);
    Json(service.history(&id).await)
}

pub async fn steady_handler(State(service): State<SharedService>) -> Json<NewsFeed> {
    Json(service.news())
}

pub async fn twitter_handler(State(service): State<SharedService>) -> Json<TweetFeed> {
    Json(service.tweets().await)
}

pub async fn telegram_handler(State(service): State<SharedService>) -> Json<SignalFeed> {
    Json(service.signals())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Credentials, DashboardConfig};
    use crate::service::ServiceSettings;
    use research_agents::StaticScorer;
    use data_ingestion::{CoinGeckoConnector, TwitterConnector};
    use std::time::Duration;

    /// Service whose upstreams point at a closed local port
    fn unreachable_service() -> SharedService {
        let prices = CoinGeckoConnector::new(
            "http://127.0.0.1:1",
            Duration::from_millis(500),
            Duration::from_millis(500),
        );
        let tweets = TwitterConnector::new("http://127.0.0.1:1", None, Duration::from_millis(500));

        Arc::new(
            DashboardService::new(
                Arc::new(prices),
                Arc::new(tweets),
                Arc::new(StaticScorer::new(-0.3)),
                Credentials::default(),
                ServiceSettings::from(&DashboardConfig::default()),
            )
            .with_seed(1),
        )
    }

    #[tokio::test]
    async fn test_crypto_handler_falls_back() {
        let Json(snapshot) =
            crypto_handler(State(unreachable_service()), Path("solana".to_string())).await;

        assert!(snapshot.is_fallback);
        assert_eq!(snapshot.name, "Solana");
    }

    #[tokio::test]
    async fn test_history_handler_simulates() {
        let Json(history) =
            history_handler(State(unreachable_service()), Path("ethereum".to_string())).await;

        assert!(history.is_simulation);
        assert_eq!(history.label, "Ethereum");
        assert_eq!(history.data.len(), 24);
    }

    #[tokio::test]
    async fn test_twitter_handler_without_token() {
        let Json(feed) = twitter_handler(State(unreachable_service())).await;

        assert!(feed.is_simulation);
        assert_eq!(feed.sentiment.metrics.hype_meter, 35);

        let json = serde_json::to_value(&feed).unwrap();
        assert_eq!(json["hype_level"], "Neutral");
        assert_eq!(json["api_success"], false);
        assert_eq!(json["items"][0]["author_id"], "user_1");
    }

    #[tokio::test]
    async fn test_family_handlers_json_shape() {
        let service = unreachable_service();

        let Json(news) = steady_handler(State(service.clone())).await;
        let json = serde_json::to_value(&news).unwrap();
        assert_eq!(json["description"], "Headlines show concern");
        assert_eq!(json["api_key_used"], false);
        assert_eq!(json["counts"]["total"], 5);

        let Json(signals) = telegram_handler(State(service.clone())).await;
        let json = serde_json::to_value(&signals).unwrap();
        assert_eq!(json["market_bias"], "Bullish");
        assert_eq!(json["items"][0]["confidence_score"], 40);
        assert_eq!(json["channels"].as_array().unwrap().len(), 5);

        let Json(posts) = refresh_sentiment_handler(State(service)).await;
        assert_eq!(posts.overall_score, -0.3);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let Json(health) = health_handler(State(unreachable_service())).await;
        assert_eq!(health.status, "ok");
    }

    #[test]
    fn test_router_builds() {
        let _router = router(unreachable_service());
    }
}
