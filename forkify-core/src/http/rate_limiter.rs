//! Per-host rate limiting for API requests.

use dashmap::DashMap;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Enforces a minimum delay between consecutive requests to the same host.
pub struct RateLimiter {
    min_delay: Duration,
    last_request: DashMap<String, Instant>,
}

impl RateLimiter {
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            last_request: DashMap::new(),
        }
    }

    /// Wait if the previous request to `host` was less than `min_delay` ago.
    pub async fn wait(&self, host: &str) {
        if self.min_delay.is_zero() {
            return;
        }

        // Copy the instant out so the map guard is not held across the sleep.
        let last = self.last_request.get(host).map(|entry| *entry);
        if let Some(last) = last {
            let elapsed = last.elapsed();
            if elapsed < self.min_delay {
                let wait_time = self.min_delay - elapsed;
                tracing::debug!(host, wait_ms = wait_time.as_millis() as u64, "rate limited");
                sleep(wait_time).await;
            }
        }

        self.last_request.insert(host.to_string(), Instant::now());
    }

    pub fn tracked_hosts(&self) -> usize {
        self.last_request.len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Duration::from_millis(200))
    }
}
