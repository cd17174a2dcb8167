use crate::parsers::{ParseError, parse_selector};
use scraper::{ElementRef, Html, Selector};

/// An ordered list of CSS selectors tried one after another for a single field.
///
/// The first selector that yields a node with non-blank text wins; later
/// selectors are not evaluated.
#[derive(Debug, Clone)]
pub struct SelectorChain {
    selectors: Vec<Selector>,
}

impl SelectorChain {
    /// Parse every selector of the chain, failing on the first invalid one
    pub fn parse(selectors: &[&str]) -> Result<Self, ParseError> {
        let selectors = selectors
            .iter()
            .map(|s| parse_selector(s))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { selectors })
    }

    fn selectors(&self) -> impl Iterator<Item = &Selector> {
        self.selectors.iter()
    }
}

/// Something that can be queried for the text of the first node matching a chain
pub trait QueryFirst {
    /// Returns the trimmed text of the first match, trying selectors in order
    fn query_first(&self, chain: &SelectorChain) -> Option<String>;
}

impl QueryFirst for ElementRef<'_> {
    fn query_first(&self, chain: &SelectorChain) -> Option<String> {
        for selector in chain.selectors() {
            let found = self
                .select(selector)
                .map(|node| element_text(&node))
                .find(|text| !text.is_empty());

            if let Some(text) = found {
                return Some(text);
            }
        }
        None
    }
}

impl QueryFirst for Html {
    fn query_first(&self, chain: &SelectorChain) -> Option<String> {
        self.root_element().query_first(chain)
    }
}

/// Concatenated descendant text of a node with whitespace collapsed
pub fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
