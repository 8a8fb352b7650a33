//! Fetch cache configuration types.

use std::time::Duration;

use serde::Deserialize;

/// Fetch cache configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Seconds a fetched page stays cached.
    pub ttl_secs: u64,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 10,
            timeout_secs: 30,
        }
    }
}

impl FetchConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}
