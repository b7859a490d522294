//! Client configuration

use std::time::Duration;

/// Default engine base URL when no environment override is present
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// Fixed per-request timeout applied by the transport
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Configuration for the engine transport
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL of the remote engine, without a trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl EngineConfig {
    /// Create a configuration with the default timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Load configuration from the environment
    ///
    /// Reads `PRICECAST_API_URL`, falling back to [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("PRICECAST_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
