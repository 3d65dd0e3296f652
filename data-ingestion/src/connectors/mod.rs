pub mod coingecko;
pub mod twitter;

pub use coingecko::CoinGeckoConnector;
pub use twitter::{RawTweet, TwitterConnector};

use common::{Unavailable, UpstreamResult};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Send a request with a timeout and decode the JSON body.
///
/// Any transport error, non-success status or body that does not match `T`
/// becomes `Unavailable`.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
    resource: &str,
    timeout: Duration,
) -> UpstreamResult<T> {
    let response = request.timeout(timeout).send().await.map_err(|e| {
        if e.is_timeout() {
            Unavailable::Timeout {
                resource: resource.to_string(),
                timeout,
            }
        } else {
            Unavailable::Transport {
                resource: resource.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(Unavailable::Status {
            resource: resource.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|e| Unavailable::Transport {
        resource: resource.to_string(),
        reason: format!("failed to read body: {}", e),
    })?;

    debug!("{} returned {} bytes", resource, body.len());

    parse_json(&body, resource)
}

pub(crate) fn parse_json<T: DeserializeOwned>(body: &str, resource: &str) -> UpstreamResult<T> {
    serde_json::from_str(body).map_err(|e| Unavailable::malformed(resource, e.to_string()))
}
