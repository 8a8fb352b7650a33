//! Expiring fetch cache.
//!
//! Wraps a [`Fetcher`] with per-URL access counting and a short-lived
//! content cache:
//!
//! - `count:{url}` counts every `fetch` call and is never reset
//! - `cache:{url}` holds the last fetched content until its TTL expires
//!
//! Expiry is left entirely to the store; there is no cleanup pass.

mod http;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

pub use http::HttpFetcher;

use crate::interfaces::kv_store::read_counter;
use crate::interfaces::{Fetcher, KvStore, Result};

/// Default lifetime of a cached page.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10);

/// Key holding the access counter for `url`.
pub fn count_key(url: &str) -> String {
    format!("count:{}", url)
}

/// Key holding the cached content for `url`.
pub fn cache_key(url: &str) -> String {
    format!("cache:{}", url)
}

/// Counting, expiring cache in front of a fetcher.
pub struct FetchCache<F> {
    store: Arc<dyn KvStore>,
    fetcher: F,
    ttl: Duration,
}

impl<F: Fetcher> FetchCache<F> {
    pub fn new(store: Arc<dyn KvStore>, fetcher: F) -> Self {
        Self {
            store,
            fetcher,
            ttl: DEFAULT_TTL,
        }
    }

    /// Set how long fetched content stays cached.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Return the content behind `url`, from cache when possible.
    ///
    /// The access counter is incremented before anything else. A failed
    /// fetch is logged and yields an empty string, which is not cached, so
    /// the next call tries the network again. Store errors propagate.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let count = self.store.incr(&count_key(url)).await?;

        let key = cache_key(url);
        if let Some(bytes) = self.store.get(&key).await? {
            debug!(url = %url, count = count, "Fetch cache hit");
            return Ok(String::from_utf8_lossy(&bytes).into_owned());
        }

        match self.fetcher.fetch(url).await {
            Ok(content) => {
                self.store
                    .set_with_expiry(&key, content.as_bytes(), self.ttl)
                    .await?;
                debug!(url = %url, count = count, ttl = ?self.ttl, "Fetch cache miss, stored");
                Ok(content)
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Error fetching URL");
                Ok(String::new())
            }
        }
    }

    /// Number of `fetch` calls made for `url` so far.
    pub async fn access_count(&self, url: &str) -> Result<i64> {
        read_counter(self.store.as_ref(), &count_key(url)).await
    }
}
