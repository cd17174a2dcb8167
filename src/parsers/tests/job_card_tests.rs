use crate::parsers::jobs::{CardSelectors, MAX_CARDS, parse_job_cards};
use crate::parsers::tests::fixtures;
use crate::results::{JobPosting, UNKNOWN_COMPANY, UNKNOWN_TITLE};

#[cfg(test)]
mod job_card_tests {
    use super::*;

    fn selectors() -> CardSelectors {
        CardSelectors::indeed().unwrap()
    }

    #[test]
    fn test_indeed_selectors_compile() {
        assert!(CardSelectors::indeed().is_ok());
    }

    #[test]
    fn test_well_formed_card() {
        let html = fixtures::page(&[fixtures::card("Rust Engineer", "Acme", "Austin, TX")]);
        let postings = parse_job_cards(&html, &selectors(), "Texas").unwrap();
        assert_eq!(
            postings,
            vec![JobPosting::new(
                "Rust Engineer".to_string(),
                "Acme".to_string(),
                "Austin, TX".to_string()
            )]
        );
    }

    #[test]
    fn test_no_cards_returns_none() {
        let html = "<html><body><div class=\"something-else\">Hi</div></body></html>";
        assert!(parse_job_cards(html, &selectors(), "Berlin").is_none());
    }

    #[test]
    fn test_empty_document_returns_none() {
        assert!(parse_job_cards("", &selectors(), "Berlin").is_none());
    }

    #[test]
    fn test_truncates_to_cap() {
        let html = fixtures::numbered_page(12);
        let postings = parse_job_cards(&html, &selectors(), "Remote").unwrap();
        assert_eq!(postings.len(), MAX_CARDS);
        assert_eq!(postings[0].title, "Engineer 1");
        assert_eq!(postings[9].title, "Engineer 10");
    }

    #[test]
    fn test_alternate_container_class() {
        let html = fixtures::page(&[r#"<div class="cardOutline tapItem">
                <h2 class="jobTitle"><span>Data Analyst</span></h2>
                <span class="companyName">Globex</span>
                <div class="companyLocation">Lisbon</div>
            </div>"#
            .to_string()]);
        let postings = parse_job_cards(&html, &selectors(), "Portugal").unwrap();
        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].title, "Data Analyst");
    }

    #[test]
    fn test_missing_company_uses_placeholder() {
        let html = fixtures::page(&[r#"<div class="job_seen_beacon">
                <h2 class="jobTitle"><span>Backend Developer</span></h2>
                <div class="companyLocation">Singapore</div>
            </div>"#
            .to_string()]);
        let postings = parse_job_cards(&html, &selectors(), "SG").unwrap();
        assert_eq!(postings[0].company, UNKNOWN_COMPANY);
        assert_eq!(postings[0].title, "Backend Developer");
        assert_eq!(postings[0].location, "Singapore");
        assert_eq!(
            postings[0].to_string(),
            "Backend Developer at Unknown Company — Singapore"
        );
    }

    #[test]
    fn test_company_fallback_chain() {
        let html = fixtures::page(&[
            r#"<div class="job_seen_beacon">
                <h2 class="jobTitle"><span>One</span></h2>
                <span data-testid="company-name">TestId Co</span>
            </div>"#
                .to_string(),
            r#"<div class="job_seen_beacon">
                <h2 class="jobTitle"><span>Two</span></h2>
                <div data-company-name="true">Attribute Co</div>
            </div>"#
                .to_string(),
        ]);
        let postings = parse_job_cards(&html, &selectors(), "Remote").unwrap();
        assert_eq!(postings[0].company, "TestId Co");
        assert_eq!(postings[1].company, "Attribute Co");
    }

    #[test]
    fn test_missing_location_uses_searched_location() {
        let html = fixtures::page(&[r#"<div class="job_seen_beacon">
                <h2 class="jobTitle"><span>QA Engineer</span></h2>
                <span class="companyName">Initech</span>
            </div>"#
            .to_string()]);
        let postings = parse_job_cards(&html, &selectors(), "new  york").unwrap();
        assert_eq!(postings[0].location, "new  york");
    }

    #[test]
    fn test_location_fallback_selector() {
        let html = fixtures::page(&[r#"<div class="job_seen_beacon">
                <h2 class="jobTitle"><span>SRE</span></h2>
                <span class="companyName">Hooli</span>
                <span data-testid="text-location">Dublin</span>
            </div>"#
            .to_string()]);
        let postings = parse_job_cards(&html, &selectors(), "Ireland").unwrap();
        assert_eq!(postings[0].location, "Dublin");
    }

    #[test]
    fn test_card_with_no_fields_is_all_placeholders() {
        let html = fixtures::page(&["<div class=\"job_seen_beacon\"></div>".to_string()]);
        let postings = parse_job_cards(&html, &selectors(), "Oslo").unwrap();
        assert_eq!(postings[0].title, UNKNOWN_TITLE);
        assert_eq!(postings[0].company, UNKNOWN_COMPANY);
        assert_eq!(postings[0].location, "Oslo");
    }
}
