// src/extract/policy.rs
// =============================================================================
// Filter policy shared by the email extractor and the link discoverer.
//
// The lists live here (not inline in the matching code) so that the set of
// excluded file types can be changed from the command line without touching
// the extraction logic.
// =============================================================================

/// File extensions that mark a string as a static asset rather than a page
/// or an address.
pub const DEFAULT_ASSET_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "webp", "bmp", "ico", "pdf", "mp4", "mp3", "avi", "mov",
];

/// Prefixes of URL fragments that the email pattern tends to pick up.
pub const DEFAULT_EXCLUDED_PREFIXES: &[&str] = &["http", "www"];

/// Which candidates and link targets to throw away.
///
/// All comparisons are ASCII case-insensitive; entries are stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPolicy {
    asset_extensions: Vec<String>,
    excluded_prefixes: Vec<String>,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            asset_extensions: DEFAULT_ASSET_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            excluded_prefixes: DEFAULT_EXCLUDED_PREFIXES
                .iter()
                .map(|prefix| prefix.to_string())
                .collect(),
        }
    }
}

impl FilterPolicy {
    /// Adds more asset extensions on top of the current list.
    ///
    /// Leading dots are accepted (`.zip` and `zip` mean the same thing).
    pub fn with_extra_extensions<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for ext in extra {
            let ext = ext.as_ref().trim().trim_start_matches('.').to_ascii_lowercase();
            if !ext.is_empty() && !self.asset_extensions.contains(&ext) {
                self.asset_extensions.push(ext);
            }
        }
        self
    }

    #[cfg(test)]
    pub fn asset_extensions(&self) -> &[String] {
        &self.asset_extensions
    }

    // True when `value` ends in ".<ext>" for any excluded extension
    //
    // Examples:
    //   "logo@site.PNG"          -> true
    //   "/files/brochure.pdf"    -> true
    //   "/about"                 -> false
    //   "/blog/png"              -> false (no dot before the extension)
    pub fn has_asset_extension(&self, value: &str) -> bool {
        let lower = value.to_ascii_lowercase();
        self.asset_extensions.iter().any(|ext| {
            lower
                .strip_suffix(ext.as_str())
                .is_some_and(|rest| rest.ends_with('.'))
        })
    }

    pub fn has_excluded_prefix(&self, value: &str) -> bool {
        let lower = value.to_ascii_lowercase();
        self.excluded_prefixes
            .iter()
            .any(|prefix| lower.starts_with(prefix.as_str()))
    }
}
