//! HTTP JSON fetcher with retry

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::{JsonFetcher, RetryPolicy};
use crate::config::FetchConfig;
use crate::error::{Error, Result};

/// `reqwest`-backed fetcher
pub struct HttpFetcher {
    /// HTTP client
    client: Client,
    /// Per-request timeout
    timeout: Duration,
    /// Retry policy applied to every GET
    policy: RetryPolicy,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("xpub-scan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout: Duration::from_millis(config.timeout_ms),
            policy: RetryPolicy::from(config),
        })
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Single GET attempt
    async fn get_once(&self, url: &str) -> Result<Value> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Error::fetch(url, e))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Error::fetch(url, format!("Status Code: {}", status)));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| Error::fetch(url, format!("invalid JSON body: {}", e)))
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn get_json(&self, url: &str) -> Result<Value> {
        self.policy.run(|| self.get_once(url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_follows_config() {
        let config = FetchConfig {
            retries: 2,
            retry_delay_ms: 100,
            timeout_ms: 5_000,
        };
        let fetcher = HttpFetcher::new(&config).unwrap();
        assert_eq!(fetcher.policy(), RetryPolicy::new(2, Duration::from_millis(100)));
        assert_eq!(fetcher.timeout, Duration::from_millis(5_000));
    }

    #[tokio::test]
    async fn test_unreachable_host_exhausts_retries() {
        let config = FetchConfig {
            retries: 2,
            retry_delay_ms: 0,
            timeout_ms: 1_000,
        };
        let fetcher = HttpFetcher::new(&config).unwrap();

        // port 9 (discard) on localhost is not listening
        let err = fetcher
            .get_json("http://127.0.0.1:9/address/unused")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fetch { .. }));
    }
}
