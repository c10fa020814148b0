// src/crawl/report.rs
// =============================================================================
// Value types for one domain's crawl.
//
// - CrawlTarget: a URL we will (or did) fetch
// - PageEmails: the addresses found on one target
// - CrawlReport: everything one crawl produced
// - ResultRow: the three text fields written to the result sink
//
// A CrawlReport is built once, at the end of a crawl, and then only read.
// =============================================================================

use crate::extract::EmailSet;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;
use url::Url;

/// An absolute http(s) URL without a fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CrawlTarget(Url);

impl CrawlTarget {
    // Returns None for non-web schemes (mailto:, tel:, javascript:, ftp:, ...)
    // and for URLs without a host
    pub fn from_url(mut url: Url) -> Option<Self> {
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return None;
        }
        url.set_fragment(None);
        Some(Self(url))
    }

    pub fn url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CrawlTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl Serialize for CrawlTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.as_str())
    }
}

// "http://", "https://", "ftp://" ... at the very start of the seed
static SCHEME_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://").expect("scheme pattern is a valid regex")
});

/// Why a seed cell could not be turned into a crawl target.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedError {
    #[error("seed is empty")]
    Empty,
    #[error("invalid seed '{0}'")]
    Invalid(String),
}

// Turns a seed cell into the root target of a crawl
//
// Examples:
//   "example.com"             -> http://example.com/
//   "  https://example.com  " -> https://example.com/
//   "example.com/?ref=https://partner.org"
//                             -> http://example.com/?ref=https://partner.org
//   ""                        -> Err(Empty)
//   "mailto:x@example.com"    -> Err(Invalid)
pub fn normalize_seed(input: &str) -> Result<CrawlTarget, SeedError> {
    let seed = input.trim();
    if seed.is_empty() {
        return Err(SeedError::Empty);
    }

    let candidate = if SCHEME_PREFIX.is_match(seed) {
        seed.to_string()
    } else {
        format!("http://{}", seed)
    };

    Url::parse(&candidate)
        .ok()
        .and_then(CrawlTarget::from_url)
        .ok_or_else(|| SeedError::Invalid(seed.to_string()))
}

/// Addresses found on one visited target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageEmails {
    pub target: CrawlTarget,
    pub emails: EmailSet,
}

/// Everything a single domain crawl produced.
///
/// `visited` and `pages` keep visit order: root first, then discovered links
/// in the order they were found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlReport {
    visited: Vec<CrawlTarget>,
    pages: Vec<PageEmails>,
    all_emails: EmailSet,
}

impl CrawlReport {
    pub(crate) fn new(visited: Vec<CrawlTarget>, pages: Vec<PageEmails>) -> Self {
        let mut all_emails = EmailSet::new();
        for page in &pages {
            all_emails.union_with(&page.emails);
        }
        Self {
            visited,
            pages,
            all_emails,
        }
    }

    pub fn visited(&self) -> &[CrawlTarget] {
        &self.visited
    }

    /// Only targets that yielded at least one address.
    pub fn pages(&self) -> &[PageEmails] {
        &self.pages
    }

    pub fn all_emails(&self) -> &EmailSet {
        &self.all_emails
    }

    pub fn emails_for(&self, target: &str) -> Option<&EmailSet> {
        self.pages
            .iter()
            .find(|page| page.target.as_str() == target)
            .map(|page| &page.emails)
    }

    pub fn to_result_row(&self) -> ResultRow {
        ResultRow::from(self)
    }
}

/// The three columns written back for each processed domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    /// Every visited URL, one per line.
    pub links_scraped: String,
    /// "<url> - <email>, <email>" per productive URL, one per line.
    pub emails_with_links: String,
    /// Every unique address, comma separated.
    pub emails: String,
}

impl From<&CrawlReport> for ResultRow {
    fn from(report: &CrawlReport) -> Self {
        let links_scraped = report
            .visited
            .iter()
            .map(CrawlTarget::as_str)
            .collect::<Vec<_>>()
            .join("\n");

        let emails_with_links = report
            .pages
            .iter()
            .map(|page| format!("{} - {}", page.target, page.emails.join(", ")))
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            links_scraped,
            emails_with_links,
            emails: report.all_emails.join(", "),
        }
    }
}
