use crate::config::ScraperConfig;
use anyhow::{Context, Result};
use rand::RngExt;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use tracing::debug;

/// Failure modes of a single fetch.
///
/// Callers need to tell a non-success HTTP status apart from a transport
/// failure: for the paginated review scraper a status miss is normal
/// category termination, while a transport error ends the run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub struct HttpClient {
    inner: reqwest::Client,
    config: ScraperConfig,
}

impl HttpClient {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            // Accept cookies so session-based pages work
            .cookie_store(true)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            inner,
            config: config.clone(),
        })
    }

    /// Fetch a URL as text. No retries: a failed fetch surfaces immediately.
    pub async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);

        let resp = self.inner.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(resp.text().await?)
    }

    /// Sleep for the configured delay + random jitter between requests to
    /// the same host.
    pub async fn polite_delay(&self) {
        let jitter = rand::rng().random_range(0..=self.config.jitter_ms);
        sleep(Duration::from_millis(self.config.request_delay_ms + jitter)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn test_config(delay_ms: u64, jitter_ms: u64) -> ScraperConfig {
        ScraperConfig {
            timeout_secs: 5,
            request_delay_ms: delay_ms,
            jitter_ms,
            user_agent: "test-agent".to_string(),
        }
    }

    #[test]
    fn test_polite_delay_waits_at_least_the_configured_delay() {
        let client = HttpClient::new(&test_config(20, 10)).unwrap();
        let start = Instant::now();
        tokio_test::block_on(client.polite_delay());
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_fetch_error_status_display() {
        let err = FetchError::Status(reqwest::StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "HTTP 404 Not Found");
    }
}
