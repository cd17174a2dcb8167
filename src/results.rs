use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder used when a card has no usable title node
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Placeholder used when no company selector matches
pub const UNKNOWN_COMPANY: &str = "Unknown Company";

/// A single job posting extracted from one card on the results page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    /// Job title
    pub title: String,

    /// Hiring company
    pub company: String,

    /// Location shown on the card, or the searched location
    pub location: String,
}

impl JobPosting {
    /// Create a new posting
    pub fn new(title: String, company: String, location: String) -> Self {
        Self {
            title,
            company,
            location,
        }
    }
}

impl fmt::Display for JobPosting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {} — {}", self.title, self.company, self.location)
    }
}

/// Human-readable reason why extraction produced no postings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic(String);

impl Diagnostic {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of one extraction call.
///
/// Extraction builds `Postings` only through [`ExtractionResult::from_postings`],
/// which degrades an empty list into a diagnostic, so a success is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    Postings(Vec<JobPosting>),
    Diagnostic(Diagnostic),
}

/// Diagnostic returned when cards were found but nothing could be formatted
pub const NO_JOBS_FOUND: &str = "No jobs found on this page.";

impl ExtractionResult {
    /// Wrap a list of postings, falling back to a diagnostic when it is empty
    pub fn from_postings(postings: Vec<JobPosting>) -> Self {
        if postings.is_empty() {
            ExtractionResult::Diagnostic(Diagnostic::new(NO_JOBS_FOUND))
        } else {
            ExtractionResult::Postings(postings)
        }
    }

    /// Returns the postings, if any
    pub fn postings(&self) -> &[JobPosting] {
        match self {
            ExtractionResult::Postings(postings) => postings,
            ExtractionResult::Diagnostic(_) => &[],
        }
    }

    pub fn is_diagnostic(&self) -> bool {
        matches!(self, ExtractionResult::Diagnostic(_))
    }
}

impl fmt::Display for ExtractionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionResult::Postings(postings) => {
                let lines = postings
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join("\n");
                f.write_str(&lines)
            }
            ExtractionResult::Diagnostic(diagnostic) => f.write_str(diagnostic.message()),
        }
    }
}
