//! Text-over-GET transport used by the recipe API.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::NetworkError;

use super::host_of;
use super::rate_limiter::RateLimiter;

/// Anything that can fetch a URL as text.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET `url`. Non-2xx, transport failures and non-UTF-8 bodies are errors.
    async fn get_text(&self, url: &str) -> Result<String, NetworkError>;
}

/// Options for [`ReqwestClient`]; defaults match [`crate::Config`].
#[derive(Clone)]
pub struct ReqwestClientBuilder {
    rate_limit_ms: u64,
    timeout: Duration,
    user_agent: String,
}

impl Default for ReqwestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestClientBuilder {
    pub fn new() -> Self {
        Self {
            rate_limit_ms: 200,
            timeout: Duration::from_secs(30),
            user_agent: format!("forkify/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Minimum gap between requests to one host, in ms (0 = no limit).
    pub fn rate_limit_ms(mut self, ms: u64) -> Self {
        self.rate_limit_ms = ms;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn build(self) -> Result<ReqwestClient, NetworkError> {
        let inner = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()?;

        Ok(ReqwestClient {
            inner: Arc::new(inner),
            rate_limiter: RateLimiter::new(Duration::from_millis(self.rate_limit_ms)),
        })
    }
}

pub struct ReqwestClient {
    inner: Arc<reqwest::Client>,
    rate_limiter: RateLimiter,
}

impl ReqwestClient {
    pub fn new() -> Result<Self, NetworkError> {
        ReqwestClientBuilder::new().build()
    }

    pub fn builder() -> ReqwestClientBuilder {
        ReqwestClientBuilder::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get_text(&self, url: &str) -> Result<String, NetworkError> {
        let parsed = url::Url::parse(url).map_err(|e| NetworkError::InvalidUrl(e.to_string()))?;

        if let Some(host) = host_of(&parsed) {
            self.rate_limiter.wait(&host).await;
        }

        tracing::debug!(url, "network: fetching");
        let response = self.inner.get(parsed).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::debug!(url, status = %status, "network: request failed");
        }
        let response = response.error_for_status()?;

        let bytes = response.bytes().await?;
        tracing::debug!(url, status = %status, len = bytes.len(), "network: fetched");

        String::from_utf8(bytes.to_vec())
            .map_err(|e| NetworkError::InvalidEncoding(format!("Invalid UTF-8 in response: {}", e)))
    }
}

/// Canned reply for one URL.
#[derive(Clone)]
pub enum MockResponse {
    Body(String),
    Error(String),
}

/// In-memory [`HttpClient`] serving canned replies.
///
/// Every requested URL is recorded, so callers can check how many network
/// calls an operation made.
#[derive(Default)]
pub struct MockClient {
    responses: HashMap<String, MockResponse>,
    requests: RwLock<Vec<String>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, url: &str, response: MockResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    /// Serve `body` for `url`.
    pub fn with_body(self, url: &str, body: &str) -> Self {
        self.with_response(url, MockResponse::Body(body.to_string()))
    }

    /// Fail requests to `url` as if the host were down.
    pub fn with_error(self, url: &str, error: &str) -> Self {
        self.with_response(url, MockResponse::Error(error.to_string()))
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .read()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn get_text(&self, url: &str) -> Result<String, NetworkError> {
        if let Ok(mut requests) = self.requests.write() {
            requests.push(url.to_string());
        }

        match self.responses.get(url) {
            Some(MockResponse::Body(body)) => Ok(body.clone()),
            Some(MockResponse::Error(e)) => Err(NetworkError::Unreachable(e.clone())),
            None => Err(NetworkError::Unreachable(format!("nothing served at {}", url))),
        }
    }
}
