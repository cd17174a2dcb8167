use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use std::sync::LazyLock;

/// Characters left untouched when embedding a value in the proxy query.
/// Unreserved characters plus `/` stay literal, everything else is escaped.
const QUERY_VALUE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

static TOKEN_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"token=[^&]*").expect("token pattern should be valid"));

/// Token placed between the words of a multi-word search term
pub const TERM_JOIN: &str = "+";

/// Trim a search term and join its words with `+` so it can sit in a query string
pub fn normalize_term(term: &str) -> String {
    term.split_whitespace().collect::<Vec<_>>().join(TERM_JOIN)
}

/// Build the search results URL for a keyword and location
pub fn build_target_url(search_base: &str, keyword: &str, location: &str) -> String {
    format!(
        "{}?q={}&l={}",
        search_base,
        normalize_term(keyword),
        normalize_term(location)
    )
}

/// Percent-encode a fully assembled target URL for use as a query parameter value
pub fn encode_target_url(target_url: &str) -> String {
    utf8_percent_encode(target_url, QUERY_VALUE_ENCODE_SET).to_string()
}

/// Build the fetch-proxy request URL that retrieves `target_url` on our behalf
pub fn build_proxy_url(proxy_base: &str, token: &str, target_url: &str) -> String {
    format!(
        "{}?token={}&url={}",
        proxy_base,
        utf8_percent_encode(token, QUERY_VALUE_ENCODE_SET),
        encode_target_url(target_url)
    )
}

/// Hide the proxy token so a request URL can be logged
pub fn redact_token(url: &str) -> String {
    TOKEN_PARAM.replace_all(url, "token=***").into_owned()
}
