use crate::config::ScrapeConfig;
use crate::fetchers::{FetchError, Fetcher};
use crate::parsers::{CardSelectors, ParseError, parse_job_cards};
use crate::results::{Diagnostic, ExtractionResult};
use crate::utils;
use std::sync::Arc;

/// Every way an extraction can come up empty.
///
/// These never escape [`JobExtractor::extract`]; each is rendered into the
/// text handed back to the agent.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("SCRAPE_DO_TOKEN is missing from your environment.")]
    MissingToken,

    #[error("Failed to fetch page: {0}")]
    Transport(#[from] FetchError),

    #[error("Failed to fetch page: HTTP {0}")]
    Status(u16),

    #[error("No job cards found. Indeed may have changed its structure.")]
    NoCards,

    #[error("Job card selectors are invalid: {0}")]
    Selectors(#[from] ParseError),
}

impl From<ScrapeError> for Diagnostic {
    fn from(err: ScrapeError) -> Self {
        Diagnostic::new(err.to_string())
    }
}

/// Scrapes one page of job listings for a keyword and location.
///
/// The proxy token is injected at construction; nothing is read from the
/// environment at call time, so two extractors never share state.
pub struct JobExtractor {
    fetcher: Arc<dyn Fetcher>,
    selectors: CardSelectors,
    token: Option<String>,
    proxy_url: String,
    search_url: String,
}

impl JobExtractor {
    /// Create an extractor using the Indeed selectors
    pub fn new(config: &ScrapeConfig, fetcher: Arc<dyn Fetcher>) -> Result<Self, ScrapeError> {
        Ok(Self::with_selectors(config, fetcher, CardSelectors::indeed()?))
    }

    /// Create an extractor with a custom selector set
    pub fn with_selectors(
        config: &ScrapeConfig,
        fetcher: Arc<dyn Fetcher>,
        selectors: CardSelectors,
    ) -> Self {
        Self {
            fetcher,
            selectors,
            token: config.token.clone(),
            proxy_url: config.proxy_url.clone(),
            search_url: config.search_url.clone(),
        }
    }

    /// Scrape listings and render them as newline-separated lines, or as a
    /// single diagnostic line when nothing could be extracted.
    pub async fn extract(&self, keyword: &str, location: &str) -> String {
        self.extract_result(keyword, location).await.to_string()
    }

    /// Structured form of [`JobExtractor::extract`]
    pub async fn extract_result(&self, keyword: &str, location: &str) -> ExtractionResult {
        match self.scrape(keyword, location).await {
            Ok(result) => result,
            Err(err) => {
                ::log::warn!("Job extraction degraded: {}", err);
                ExtractionResult::Diagnostic(err.into())
            }
        }
    }

    async fn scrape(
        &self,
        keyword: &str,
        location: &str,
    ) -> Result<ExtractionResult, ScrapeError> {
        let token = self.token.as_deref().ok_or(ScrapeError::MissingToken)?;

        let target_url = utils::build_target_url(&self.search_url, keyword, location);
        let proxy_url = utils::build_proxy_url(&self.proxy_url, token, &target_url);

        println!("Scraping via Scrape.do: {}", target_url);
        ::log::info!("Fetching {}", utils::redact_token(&proxy_url));

        let response = self.fetcher.get(&proxy_url).await?;
        if !response.is_ok() {
            return Err(ScrapeError::Status(response.status));
        }

        let postings = parse_job_cards(&response.body, &self.selectors, location)
            .ok_or(ScrapeError::NoCards)?;
        ::log::info!("Extracted {} postings for {}", postings.len(), target_url);

        Ok(ExtractionResult::from_postings(postings))
    }
}
