//! Time-windowed memoization
//!
//! Entries are keyed by resource (`"price:bitcoin"`, `"history:solana"`) and
//! each lookup states its own window. A stored `{stored_at, payload}` pair is
//! replaced whole under the write lock, so readers never see a torn entry.
//!
//! Each entry also remembers the window it was stored under; inserts drop
//! every entry past its own window, so the map only holds live keys.
//!
//! There is no single-flight: concurrent misses on the same key each run
//! their compute function and the last write wins.

use crate::clock::{Clock, SystemClock};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

struct CacheEntry<T> {
    stored_at: DateTime<Utc>,
    window: chrono::Duration,
    payload: Arc<T>,
}

fn to_chrono(window: Duration) -> chrono::Duration {
    chrono::Duration::from_std(window).unwrap_or(chrono::Duration::MAX)
}

/// Cache of computed payloads, one slot per key
pub struct TimedCache<T> {
    entries: RwLock<HashMap<String, CacheEntry<T>>>,
    clock: Arc<dyn Clock>,
}

impl<T: Send + Sync> TimedCache<T> {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Payload stored under `key` if younger than `window`
    pub async fn get(&self, key: &str, window: Duration) -> Option<Arc<T>> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;

        let age = self.clock.now() - entry.stored_at;

        if age < to_chrono(window) {
            Some(entry.payload.clone())
        } else {
            None
        }
    }

    /// Store `payload` under `key`, replacing any previous entry and
    /// dropping entries older than their own window
    pub async fn insert(&self, key: &str, payload: T, window: Duration) -> Arc<T> {
        let now = self.clock.now();
        let payload = Arc::new(payload);
        let entry = CacheEntry {
            stored_at: now,
            window: to_chrono(window),
            payload: payload.clone(),
        };

        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, e| now - e.stored_at < e.window);
        if entries.len() < before {
            debug!("Pruned {} expired cache entries", before - entries.len());
        }
        entries.insert(key.to_string(), entry);

        payload
    }

    /// Return the fresh entry for `key`, or compute, store and return a new one
    pub async fn get_or_compute<F, Fut>(&self, key: &str, window: Duration, compute: F) -> Arc<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        if let Some(hit) = self.get(key, window).await {
            debug!("Cache hit for {}", key);
            return hit;
        }

        debug!("Cache miss for {}", key);
        let payload = compute().await;
        self.insert(key, payload, window).await
    }

    /// Like `get_or_compute`, but only successful results are stored.
    /// Errors are handed back untouched and leave the previous entry in place.
    pub async fn get_or_try_compute<F, Fut, E>(
        &self,
        key: &str,
        window: Duration,
        compute: F,
    ) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.get(key, window).await {
            debug!("Cache hit for {}", key);
            return Ok(hit);
        }

        debug!("Cache miss for {}", key);
        let payload = compute().await?;
        Ok(self.insert(key, payload, window).await)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl<T: Send + Sync> Default for TimedCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const WINDOW: Duration = Duration::from_secs(10);

    fn cache_with_clock() -> (TimedCache<String>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        (TimedCache::with_clock(clock.clone()), clock)
    }

    #[tokio::test]
    async fn test_hit_within_window() {
        let (cache, clock) = cache_with_clock();
        let calls = AtomicUsize::new(0);

        let first = cache
            .get_or_compute("price:bitcoin", WINDOW, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                "first".to_string()
            })
            .await;

        clock.advance(chrono::Duration::seconds(9));

        let second = cache
            .get_or_compute("price:bitcoin", WINDOW, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                "second".to_string()
            })
            .await;

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recompute_after_window() {
        let (cache, clock) = cache_with_clock();

        cache.insert("price:bitcoin", "old".to_string(), WINDOW).await;
        clock.advance(chrono::Duration::seconds(10));

        let value = cache
            .get_or_compute("price:bitcoin", WINDOW, || async { "new".to_string() })
            .await;
        assert_eq!(value.as_str(), "new");
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_windows_are_per_lookup() {
        let (cache, clock) = cache_with_clock();

        cache
            .insert("history:bitcoin", "chart".to_string(), Duration::from_secs(300))
            .await;
        clock.advance(chrono::Duration::seconds(60));

        assert!(cache.get("history:bitcoin", WINDOW).await.is_none());
        assert!(cache.get("history:bitcoin", Duration::from_secs(300)).await.is_some());
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let (cache, _clock) = cache_with_clock();

        cache.insert("price:bitcoin", "btc".to_string(), WINDOW).await;
        let eth = cache
            .get_or_compute("price:ethereum", WINDOW, || async { "eth".to_string() })
            .await;

        assert_eq!(eth.as_str(), "eth");
        assert_eq!(cache.get("price:bitcoin", WINDOW).await.unwrap().as_str(), "btc");
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let (cache, _clock) = cache_with_clock();

        let failed: Result<Arc<String>, &str> = cache
            .get_or_try_compute("price:bitcoin", WINDOW, || async { Err("offline") })
            .await;
        assert_eq!(failed.unwrap_err(), "offline");
        assert!(cache.is_empty().await);

        let ok: Result<Arc<String>, &str> = cache
            .get_or_try_compute("price:bitcoin", WINDOW, || async { Ok("live".to_string()) })
            .await;
        assert_eq!(ok.unwrap().as_str(), "live");
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_expired_entries_are_pruned() {
        let (cache, clock) = cache_with_clock();

        for i in 0..100 {
            let key = format!("price:coin-{}", i);
            cache.get_or_compute(&key, WINDOW, || async { "p".to_string() }).await;
        }
        assert_eq!(cache.len().await, 100);

        clock.advance(chrono::Duration::hours(24));
        cache
            .get_or_compute("price:bitcoin", WINDOW, || async { "btc".to_string() })
            .await;
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_pruning_keeps_live_entries() {
        let (cache, clock) = cache_with_clock();

        cache.insert("price:bitcoin", "btc".to_string(), WINDOW).await;
        cache
            .insert("history:bitcoin", "chart".to_string(), Duration::from_secs(300))
            .await;

        clock.advance(chrono::Duration::seconds(60));
        cache.insert("price:ethereum", "eth".to_string(), WINDOW).await;

        assert_eq!(cache.len().await, 2);
        assert!(cache.get("price:bitcoin", WINDOW).await.is_none());
        assert!(cache
            .get("history:bitcoin", Duration::from_secs(300))
            .await
            .is_some());
    }
}
