mod job_card_tests;

/// Builders for search results pages used across the crate's tests
pub(crate) mod fixtures {
    /// One well-formed card using the primary selectors
    pub fn card(title: &str, company: &str, location: &str) -> String {
        format!(
            r#"<div class="job_seen_beacon">
                <h2 class="jobTitle"><a href="/rc/clk"><span title="{title}">{title}</span></a></h2>
                <span class="companyName">{company}</span>
                <div class="companyLocation">{location}</div>
            </div>"#
        )
    }

    /// Wrap card markup in a full results page
    pub fn page(cards: &[String]) -> String {
        format!(
            r#"<!DOCTYPE html>
            <html><head><title>Jobs</title></head>
            <body><div id="mosaic-provider-jobcards"><ul>{}</ul></div></body></html>"#,
            cards.join("\n")
        )
    }

    /// A page with `count` numbered cards
    pub fn numbered_page(count: usize) -> String {
        let cards = (1..=count)
            .map(|i| card(&format!("Engineer {i}"), &format!("Company {i}"), "Remote"))
            .collect::<Vec<_>>();
        page(&cards)
    }
}
