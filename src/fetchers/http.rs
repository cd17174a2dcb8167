use crate::fetchers::fetcher::{FetchError, FetchResponse, Fetcher};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Browser-like User-Agent sent with every page request
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// Fetcher backed by a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// Create a fetcher whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    async fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let started = std::time::Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        ::log::debug!(
            "GET returned HTTP {} with {} bytes in {:.2} seconds",
            status,
            body.len(),
            started.elapsed().as_secs_f64()
        );

        Ok(FetchResponse { status, body })
    }
}
