// src/crawl/links.rs
// =============================================================================
// Finds the pages worth visiting from a seed page.
//
// How it works:
// 1. Fetch the seed page (HTML only)
// 2. Collect every <a href>
// 3. Resolve each href against the seed URL (relative, protocol-relative and
//    "#fragment" links all become absolute here)
// 4. Keep http(s) links on the same registrable domain whose path is not a
//    static asset
// 5. Drop duplicates, keeping first-seen order
//
// A failed fetch is not an error for the crawl: the page simply has no links.
// =============================================================================

use crate::crawl::report::CrawlTarget;
use crate::crawl::scope::same_site;
use crate::extract::html::anchor_hrefs;
use crate::extract::FilterPolicy;
use crate::fetch::Fetcher;
use std::collections::HashSet;
use tracing::{debug, info, warn};
use url::Url;

pub async fn discover_links(
    fetcher: &Fetcher,
    seed: &CrawlTarget,
    policy: &FilterPolicy,
) -> Vec<CrawlTarget> {
    let html = match fetcher.fetch_html(seed.url()).await {
        Ok(html) => html,
        Err(e) if e.is_not_html() => {
            info!(url = %seed, reason = %e, "Skipping link discovery");
            return Vec::new();
        }
        Err(e) => {
            warn!(url = %seed, error = %e, "Failed to fetch page for link discovery");
            return Vec::new();
        }
    };

    let links = in_scope_links(&html, seed.url(), policy);
    debug!(url = %seed, count = links.len(), "Discovered in-scope links");
    links
}

// The pure half of discover_links: filters the anchors of `html`
//
// Parameters:
//   html: page markup
//   base: URL the page was fetched from (for resolution and scoping)
//   policy: asset extensions to skip
pub fn in_scope_links(html: &str, base: &Url, policy: &FilterPolicy) -> Vec<CrawlTarget> {
    let mut seen = HashSet::new();

    anchor_hrefs(html)
        .iter()
        .filter_map(|href| resolve_link(base, href))
        .filter(|link| same_site(link.as_str(), base.as_str()))
        .filter(|link| !policy.has_asset_extension(link.url().path()))
        .filter(|link| seen.insert(link.clone()))
        .collect()
}

// Resolves a link (possibly relative) to an absolute crawl target
//
// Url::join handles every href form a browser would:
//   "/docs"              -> https://example.com/docs
//   "//cdn.example.com"  -> https://cdn.example.com/
//   "#top"               -> the base page itself (fragment removed below)
//   "mailto:..."         -> parses fine, rejected by CrawlTarget::from_url
fn resolve_link(base: &Url, href: &str) -> Option<CrawlTarget> {
    base.join(href.trim()).ok().and_then(CrawlTarget::from_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::ClientConfig;

    fn links(html: &str, base: &str) -> Vec<String> {
        let base = Url::parse(base).unwrap();
        in_scope_links(html, &base, &FilterPolicy::default())
            .iter()
            .map(|t| t.to_string())
            .collect()
    }

    #[test]
    fn test_resolve_relative_link() {
        let html = r#"<a href="/docs">Docs</a><a href="../team">Team</a>"#;
        assert_eq!(
            links(html, "https://example.com/about/us"),
            vec!["https://example.com/docs", "https://example.com/team"]
        );
    }

    #[test]
    fn test_subdomains_in_scope() {
        let html = r#"<a href="https://blog.example.com/post">Blog</a>
                      <a href="//shop.example.com/">Shop</a>"#;
        assert_eq!(
            links(html, "https://example.com/"),
            vec!["https://blog.example.com/post", "https://shop.example.com/"]
        );
    }

    #[test]
    fn test_other_domain_excluded() {
        let html = r#"<a href="https://other-domain.com/contact">Other</a>"#;
        assert!(links(html, "https://example.com/").is_empty());
    }

    #[test]
    fn test_relative_asset_excluded() {
        let html = r#"<a href="/files/brochure.pdf">Brochure</a><a href="/img/Logo.PNG">Logo</a>"#;
        assert!(links(html, "https://example.com/about").is_empty());
    }

    #[test]
    fn test_asset_check_ignores_query() {
        let html = r#"<a href="/contact?file=x.pdf">Contact</a>"#;
        assert_eq!(
            links(html, "https://example.com/"),
            vec!["https://example.com/contact?file=x.pdf"]
        );
    }

    #[test]
    fn test_skip_non_web_schemes() {
        let html = r#"<a href="mailto:hr@example.com">Mail</a>
                      <a href="tel:+15551234">Call</a>
                      <a href="javascript:void(0)">JS</a>"#;
        assert!(links(html, "https://example.com/").is_empty());
    }

    #[test]
    fn test_fragments_collapse_and_dedupe() {
        let html = r##"<a href="#top">Top</a>
                       <a href="/team#jobs">Jobs</a>
                       <a href="/team">Team</a>"##;
        assert_eq!(
            links(html, "https://example.com/"),
            vec!["https://example.com/", "https://example.com/team"]
        );
    }

    #[tokio::test]
    async fn test_discover_links_non_html_is_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"href": "/team"}"#)
            .create_async()
            .await;

        let fetcher = Fetcher::new(ClientConfig::default()).unwrap();
        let seed = CrawlTarget::from_url(Url::parse(&server.url()).unwrap()).unwrap();

        assert!(discover_links(&fetcher, &seed, &FilterPolicy::default()).await.is_empty());
    }

    #[tokio::test]
    async fn test_discover_links_from_server() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(r#"<a href="/team">Team</a><a href="https://other-domain.com/">x</a>"#)
            .create_async()
            .await;

        let fetcher = Fetcher::new(ClientConfig::default()).unwrap();
        let seed = CrawlTarget::from_url(Url::parse(&server.url()).unwrap()).unwrap();
        let found = discover_links(&fetcher, &seed, &FilterPolicy::default()).await;

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].as_str(), format!("{}/team", server.url()));
    }
}
