// src/crawl/scope.rs
// =============================================================================
// Decides which URLs belong to the site being crawled.
//
// "Same site" means: the last two labels of the host are equal.
//   https://mail.example.com/page  -> example.com
//   https://example.com/           -> example.com
//
// This is a plain heuristic, not a public suffix lookup, so
// "shop.example.co.uk" reduces to "co.uk". That is the accepted behavior.
// =============================================================================

use std::fmt;
use url::Url;

/// The two-label scope key of a host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegistrableDomain(String);

impl fmt::Display for RegistrableDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Reduces a URL string to its registrable domain
//
// Never fails: an unparsable URL or a URL without a host gives an empty
// domain, a single-label host ("localhost") gives itself.
pub fn registrable_domain(url: &str) -> RegistrableDomain {
    match Url::parse(url) {
        Ok(parsed) => registrable_domain_of(&parsed),
        Err(_) => RegistrableDomain(String::new()),
    }
}

fn registrable_domain_of(url: &Url) -> RegistrableDomain {
    let host = url.host_str().unwrap_or("").trim_end_matches('.');
    let labels: Vec<&str> = host.split('.').collect();
    let start = labels.len().saturating_sub(2);
    RegistrableDomain(labels[start..].join("."))
}

pub fn same_site(a: &str, b: &str) -> bool {
    registrable_domain(a) == registrable_domain(b)
}
