pub mod html;
pub mod jobs;

#[cfg(test)]
pub(crate) mod tests;

pub use html::{QueryFirst, SelectorChain};
pub use jobs::{CardSelectors, MAX_CARDS, parse_job_cards};

/// Errors raised while preparing HTML queries
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A hardcoded or configured CSS selector failed to parse
    #[error("invalid CSS selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// Parse a single CSS selector, keeping the offending text in the error
pub fn parse_selector(selector: &str) -> Result<scraper::Selector, ParseError> {
    scraper::Selector::parse(selector).map_err(|e| ParseError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
