// src/extract/html.rs
// =============================================================================
// This module pulls anchors out of HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is lenient: broken markup still parses, it just yields fewer anchors
//
// Two views of the same anchors are offered:
// - anchor_hrefs: every raw href, for link discovery
// - mailto_targets: the address part of every mailto: href, for scraping
// =============================================================================

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("anchor selector is valid CSS"));

const MAILTO_PREFIX: &str = "mailto:";

// Returns every href value in document order, untouched
//
// Example:
//   html = "<a href='/docs'>Docs</a><a>no href</a>"
//   result = ["/docs"]
pub fn anchor_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.to_string())
        .collect()
}

// Returns what follows "mailto:" in each mailto anchor, trimmed
//
// The prefix match ignores case ("MAILTO:" is common in older sites).
// Query strings such as "?subject=Hi" are left in place; the email
// extractor stops at the '?' anyway.
//
// Example:
//   html = "<a href='mailto: hr@example.com '>HR</a>"
//   result = ["hr@example.com"]
pub fn mailto_targets(html: &str) -> Vec<String> {
    anchor_hrefs(html)
        .iter()
        .filter_map(|href| strip_mailto(href.trim()))
        .map(|target| target.trim().to_string())
        .filter(|target| !target.is_empty())
        .collect()
}

fn strip_mailto(href: &str) -> Option<&str> {
    let prefix = href.get(..MAILTO_PREFIX.len())?;
    if prefix.eq_ignore_ascii_case(MAILTO_PREFIX) {
        Some(&href[MAILTO_PREFIX.len()..])
    } else {
        None
    }
}
