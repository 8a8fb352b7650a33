//! Content fetch interface.

use async_trait::async_trait;

/// Errors that can occur while fetching remote content.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GET {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failure reported by a non-HTTP `Fetcher` (file, gRPC, in-process).
    #[error("Fetch failed: {0}")]
    Other(String),
}

/// Retrieves the content behind a URL.
///
/// Failures are not retried by callers.
///
/// Implementations:
/// - `HttpFetcher`: reqwest GET, reporting `Http` and `Status`
/// - custom fetchers report their own failures as `Other`
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
