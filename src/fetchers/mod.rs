pub mod fetcher;
pub mod http;

pub use fetcher::{FetchError, FetchResponse, Fetcher};
pub use http::{BROWSER_USER_AGENT, ReqwestFetcher};
