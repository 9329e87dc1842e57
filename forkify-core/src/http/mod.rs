//! HTTP client used for every call to the recipe API.
//!
//! All outgoing requests go through the [`HttpClient`] trait so the models can
//! be exercised against [`MockClient`] in tests.

mod client;
mod rate_limiter;

pub use client::{HttpClient, MockClient, MockResponse, ReqwestClient, ReqwestClientBuilder};
pub use rate_limiter::RateLimiter;

/// Extract the host from a URL, used as the rate limiting key.
pub(crate) fn host_of(url: &url::Url) -> Option<String> {
    url.host_str().map(|h| h.trim_start_matches("www.").to_string())
}
