use async_trait::async_trait;
use common::{Unavailable, UpstreamResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

use super::fetch_json;
use crate::sources::TweetSource;

const RESOURCE: &str = "twitter:recent_search";
const SEARCH_QUERY: &str = "bitcoin OR BTC OR cryptocurrency";
const MAX_RESULTS: usize = 10;

/// Tweet as returned by the recent-search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTweet {
    pub text: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub author_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    data: Vec<RawTweet>,
}

/// Twitter/X v2 recent search connector
pub struct TwitterConnector {
    base_url: String,
    bearer_token: Option<String>,
    client: Client,
    timeout: Duration,
}

impl TwitterConnector {
    pub fn new(base_url: &str, bearer_token: Option<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            bearer_token: bearer_token.filter(|t| !t.trim().is_empty()),
            client: Client::new(),
            timeout,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.bearer_token.is_some()
    }
}

fn into_tweets(response: SearchResponse) -> UpstreamResult<Vec<RawTweet>> {
    if response.data.is_empty() {
        return Err(Unavailable::malformed(RESOURCE, "empty data"));
    }
    Ok(response.data.into_iter().take(MAX_RESULTS).collect())
}

#[async_trait]
impl TweetSource for TwitterConnector {
    async fn fetch_recent(&self) -> UpstreamResult<Vec<RawTweet>> {
        let token = self
            .bearer_token
            .as_ref()
            .ok_or_else(|| Unavailable::not_configured(RESOURCE))?;

        let url = format!("{}/2/tweets/search/recent", self.base_url);
        let max_results = MAX_RESULTS.to_string();
        let request = self.client.get(&url).bearer_auth(token).query(&[
            ("query", SEARCH_QUERY),
            ("max_results", max_results.as_str()),
            ("tweet.fields", "created_at,author_id,public_metrics"),
        ]);

        let response: SearchResponse = fetch_json(request, RESOURCE, self.timeout).await?;
        let tweets = into_tweets(response)?;
        info!("Fetched {} tweets from Twitter", tweets.len());

        Ok(tweets)
    }
}
