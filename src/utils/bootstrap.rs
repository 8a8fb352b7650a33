//! Bootstrap utilities for kvtrace binaries.
//!
//! Shared initialization: tracing, then the store and the components built
//! on it.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cache::Cache;
use crate::config::{Config, LOG_ENV_VAR};
use crate::fetch::{FetchCache, HttpFetcher};
use crate::interfaces::{FetchError, StoreError};
use crate::storage::init_store;

/// Errors that can occur while wiring components together.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Store initialization failed: {0}")]
    Store(#[from] StoreError),

    #[error("HTTP client initialization failed: {0}")]
    Fetch(#[from] FetchError),
}

/// Initialize tracing with KVTRACE_LOG environment variable.
///
/// Defaults to "info" level if KVTRACE_LOG is not set.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Components sharing one store handle.
pub struct Components {
    pub cache: Cache,
    pub fetch_cache: FetchCache<HttpFetcher>,
}

/// Connect to the configured store and build the cache and fetch cache.
///
/// The cache is created first, which clears the store.
pub async fn build_components(config: &Config) -> Result<Components, BootstrapError> {
    let store = init_store(&config.store).await?;

    let cache = Cache::new(store.clone()).await?;
    let fetcher = HttpFetcher::from_config(&config.fetch)?;
    let fetch_cache = FetchCache::new(store, fetcher).with_ttl(config.fetch.ttl());

    info!(ttl_secs = config.fetch.ttl_secs, "Components ready");
    Ok(Components { cache, fetch_cache })
}
