//! kvtrace-demo: walkthrough of the instrumented cache
//!
//! Stores a few values, reads them back, replays the recorded `store`
//! history, then (if a URL is given) fetches it three times through the
//! expiring fetch cache: cold, warm, and after the TTL has passed.
//!
//! ## Usage
//! ```text
//! kvtrace-demo [URL]
//! ```
//!
//! ## Configuration
//! - KVTRACE_CONFIG: Path to a YAML config file (optional)
//! - KVTRACE__STORE__TYPE: `redis` (default) or `memory`
//! - KVTRACE__STORE__REDIS__URL: Redis URL (default: redis://127.0.0.1:6379)
//! - KVTRACE_LOG: Log filter (default: info)
//!
//! The configured Redis database is flushed on startup.

use std::time::{Duration, Instant};

use tracing::info;

use kvtrace::config::Config;
use kvtrace::utils::bootstrap::{build_components, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = Config::load(None)?;
    let components = build_components(&config).await?;
    let cache = &components.cache;

    let text = cache.store("foo").await?;
    let bytes = cache.store(b"bar".as_slice()).await?;
    let int = cache.store(100i64).await?;
    let float = cache.store(2.5f64).await?;

    println!("{} -> {:?}", text, cache.retrieve_as_text(&text).await?);
    println!("{} -> {:?}", bytes, cache.retrieve(&bytes).await?);
    println!("{} -> {:?}", int, cache.retrieve_as_integer(&int).await?);
    println!("{} -> {:?}", float, cache.retrieve_as_float(&float).await?);
    println!();

    cache.replay().await?;

    let Some(url) = std::env::args().nth(1) else {
        return Ok(());
    };

    let fetch_cache = &components.fetch_cache;

    println!("\n--- 1. First request (fetches from the web) ---");
    timed_fetch(fetch_cache, &url).await?;

    println!("\n--- 2. Second request (served from cache) ---");
    timed_fetch(fetch_cache, &url).await?;

    let wait = fetch_cache.ttl() + Duration::from_secs(1);
    println!("\n--- Waiting {:?} for the cache to expire... ---", wait);
    tokio::time::sleep(wait).await;

    println!("\n--- 3. Third request (cache expired, fetches again) ---");
    timed_fetch(fetch_cache, &url).await?;

    let count = fetch_cache.access_count(&url).await?;
    info!(url = %url, count = count, "Fetch demo complete");
    Ok(())
}

async fn timed_fetch(
    fetch_cache: &kvtrace::FetchCache<kvtrace::HttpFetcher>,
    url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let body = fetch_cache.fetch(url).await?;
    println!(
        "Time taken: {:.2} seconds ({} bytes)",
        start.elapsed().as_secs_f64(),
        body.len()
    );
    Ok(())
}
