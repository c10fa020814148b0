// src/crawl/page.rs
// =============================================================================
// Scrapes one page for email addresses.
//
// Two passes over the same response:
// 1. The whole body, as text (catches addresses written out on the page)
// 2. The mailto: anchors, stripped of their prefix and run through the same
//    extractor (validates them and splits "a@x.com,b@x.com" style values)
//
// The result is the union. Any fetch problem gives an empty set.
// =============================================================================

use crate::crawl::report::CrawlTarget;
use crate::extract::html::mailto_targets;
use crate::extract::{extract_emails, EmailSet, FilterPolicy};
use crate::fetch::Fetcher;
use tracing::{debug, info, warn};

pub async fn scrape_page(fetcher: &Fetcher, target: &CrawlTarget, policy: &FilterPolicy) -> EmailSet {
    let html = match fetcher.fetch_html(target.url()).await {
        Ok(html) => html,
        Err(e) if e.is_not_html() => {
            info!(url = %target, reason = %e, "Skipping non-HTML page");
            return EmailSet::new();
        }
        Err(e) => {
            warn!(url = %target, error = %e, "Failed to retrieve page");
            return EmailSet::new();
        }
    };

    let emails = emails_in_page(&html, policy);
    debug!(url = %target, count = emails.len(), "Scraped page");
    emails
}

// Both extraction passes over already-fetched markup
pub fn emails_in_page(html: &str, policy: &FilterPolicy) -> EmailSet {
    let mut emails = extract_emails(html, policy);

    let mailto_text = mailto_targets(html).join("\n");
    emails.union_with(&extract_emails(&mailto_text, policy));

    emails
}
