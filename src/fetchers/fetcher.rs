use async_trait::async_trait;

/// Status and body of a completed GET request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,

    /// Response body decoded as text
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is exactly 200 OK
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Transport-level failure: the request never produced a response
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("transport error: {0}")]
    Transport(String),
}

// Base trait for page fetchers; the only network seam of job extraction
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Issue a single GET request for `url`
    async fn get(&self, url: &str) -> Result<FetchResponse, FetchError>;
}
