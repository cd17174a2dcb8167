use crate::parsers::html::{QueryFirst, SelectorChain};
use crate::parsers::{ParseError, parse_selector};
use crate::results::{JobPosting, UNKNOWN_COMPANY, UNKNOWN_TITLE};
use scraper::{Html, Selector};

/// Hard cap on the number of job cards parsed from one page
pub const MAX_CARDS: usize = 10;

/// Job card containers; the site alternates between these two classes
pub const CARD_SELECTOR: &str = "div.job_seen_beacon, div.cardOutline";

pub const TITLE_SELECTORS: &[&str] = &["h2.jobTitle span"];

pub const COMPANY_SELECTORS: &[&str] = &[
    "span.companyName",
    "span[data-testid='company-name']",
    "div[data-company-name]",
];

pub const LOCATION_SELECTORS: &[&str] = &[
    "div.companyLocation",
    "span[data-testid='text-location']",
];

/// Compiled selectors for locating job cards and their fields
#[derive(Debug, Clone)]
pub struct CardSelectors {
    cards: Selector,
    title: SelectorChain,
    company: SelectorChain,
    location: SelectorChain,
}

impl CardSelectors {
    /// Build a selector set from raw CSS
    pub fn new(
        cards: &str,
        title: &[&str],
        company: &[&str],
        location: &[&str],
    ) -> Result<Self, ParseError> {
        Ok(Self {
            cards: parse_selector(cards)?,
            title: SelectorChain::parse(title)?,
            company: SelectorChain::parse(company)?,
            location: SelectorChain::parse(location)?,
        })
    }

    /// Selectors matching the Indeed search results markup
    pub fn indeed() -> Result<Self, ParseError> {
        Self::new(
            CARD_SELECTOR,
            TITLE_SELECTORS,
            COMPANY_SELECTORS,
            LOCATION_SELECTORS,
        )
    }
}

/// Extracts postings from a search results page.
///
/// Returns `None` when the page holds no job card at all, which usually means
/// the site changed its markup. Otherwise returns one posting per card for at
/// most [`MAX_CARDS`] cards. Missing fields fall back to placeholders, and a
/// missing location falls back to `searched_location`.
pub fn parse_job_cards(
    html: &str,
    selectors: &CardSelectors,
    searched_location: &str,
) -> Option<Vec<JobPosting>> {
    let doc = Html::parse_document(html);

    let cards = doc.select(&selectors.cards).collect::<Vec<_>>();
    ::log::debug!("Found {} job cards", cards.len());

    if cards.is_empty() {
        return None;
    }

    let postings = cards
        .iter()
        .take(MAX_CARDS)
        .map(|card| {
            let title = card
                .query_first(&selectors.title)
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string());
            let company = card
                .query_first(&selectors.company)
                .unwrap_or_else(|| UNKNOWN_COMPANY.to_string());
            let location = card
                .query_first(&selectors.location)
                .unwrap_or_else(|| searched_location.to_string());

            JobPosting::new(title, company, location)
        })
        .collect();

    Some(postings)
}
