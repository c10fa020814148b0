// src/extract/email.rs
// =============================================================================
// Email candidate extraction.
//
// Takes any text (a whole HTML document, or a handful of mailto: targets)
// and returns the set of strings that look like email addresses, minus the
// shapes we know to be false positives:
//   - retina image names such as "logo@2x.png"
//   - anything ending in a static asset extension
//   - URL fragments such as "www.foo@bar.com"
//
// This module does no I/O and keeps no state, so the same input always
// gives the same set.
// =============================================================================

use crate::extract::policy::FilterPolicy;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("email pattern is a valid regex")
});

// "@2x", "@3x", "@10x" ... as used for high-density image variants
static DENSITY_SUFFIX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@\d+x").expect("density pattern is a valid regex"));

/// An address that matched the email pattern and survived the filters.
///
/// Only [`extract_emails`] creates these.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A set of unique addresses, iterated in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EmailSet(BTreeSet<EmailAddress>);

impl EmailSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn contains(&self, address: &str) -> bool {
        self.0.iter().any(|a| a.as_str() == address)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmailAddress> {
        self.0.iter()
    }

    /// Adds every address of `other` to this set.
    pub fn union_with(&mut self, other: &EmailSet) {
        self.0.extend(other.0.iter().cloned());
    }

    /// Joins the addresses with `separator`, in sorted order.
    pub fn join(&self, separator: &str) -> String {
        self.iter()
            .map(EmailAddress::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl FromIterator<EmailAddress> for EmailSet {
    fn from_iter<I: IntoIterator<Item = EmailAddress>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a EmailSet {
    type Item = &'a EmailAddress;
    type IntoIter = std::collections::btree_set::Iter<'a, EmailAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// Finds every email-shaped substring of `text` that passes the filters
//
// Parameters:
//   text: raw text to scan (HTML source is fine, tags are just more text)
//   policy: which extensions and prefixes to reject
//
// Example:
//   "Write to sales@example.com <img src='logo@2x.png'>"
//   -> {"sales@example.com"}
pub fn extract_emails(text: &str, policy: &FilterPolicy) -> EmailSet {
    EMAIL_REGEX
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|candidate| is_plausible_address(candidate, policy))
        .map(|candidate| EmailAddress(candidate.to_string()))
        .collect()
}

fn is_plausible_address(candidate: &str, policy: &FilterPolicy) -> bool {
    !DENSITY_SUFFIX_REGEX.is_match(candidate)
        && !policy.has_asset_extension(candidate)
        && !policy.has_excluded_prefix(candidate)
}
