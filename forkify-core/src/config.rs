//! Configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::NetworkError;
use crate::http::ReqwestClient;

/// Default recipe API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://forkify-api.herokuapp.com/api";

/// Default number of search results per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default HTTP timeout in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Default delay between requests to the same host in milliseconds.
pub const DEFAULT_RATE_LIMIT_MS: u64 = 200;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the recipe API (without trailing slash).
    pub api_base_url: String,
    /// Path of the JSON file backing the key-value store.
    pub storage_path: PathBuf,
    /// Search results shown per page.
    pub page_size: usize,
    /// Request timeout.
    pub http_timeout: Duration,
    /// Milliseconds to wait between requests to the same host.
    pub rate_limit_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            storage_path: Self::default_storage_path(),
            page_size: DEFAULT_PAGE_SIZE,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            rate_limit_ms: DEFAULT_RATE_LIMIT_MS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All optional:
    /// - `FORKIFY_API_BASE_URL`: recipe API base URL
    /// - `FORKIFY_STORAGE_PATH`: storage file (default: "~/.forkify/storage.json")
    /// - `FORKIFY_PAGE_SIZE`: results per page (default: 10)
    /// - `FORKIFY_HTTP_TIMEOUT_SECS`: request timeout (default: 30)
    /// - `FORKIFY_RATE_LIMIT_MS`: per-host delay, 0 disables (default: 200)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_base_url = env::var("FORKIFY_API_BASE_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);

        let storage_path = env::var("FORKIFY_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.storage_path);

        let page_size = env::var("FORKIFY_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(defaults.page_size);

        let http_timeout = env::var("FORKIFY_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.http_timeout);

        let rate_limit_ms = env::var("FORKIFY_RATE_LIMIT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.rate_limit_ms);

        Self {
            api_base_url,
            storage_path,
            page_size,
            http_timeout,
            rate_limit_ms,
        }
    }

    /// Get the default storage file: ~/.forkify/storage.json
    pub fn default_storage_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".forkify").join("storage.json"))
            .unwrap_or_else(|| PathBuf::from("data/storage.json"))
    }

    /// Build the production HTTP client from this configuration.
    pub fn http_client(&self) -> Result<ReqwestClient, NetworkError> {
        ReqwestClient::builder()
            .timeout(self.http_timeout)
            .rate_limit_ms(self.rate_limit_ms)
            .build()
    }
}
