// src/crawl/queue.rs
// =============================================================================
// This module drives the crawl of one seed domain.
//
// How it works:
// 1. Mark the root visited, then scrape it
// 2. Discover the root's in-scope links
// 3. Scrape each link that has not been visited yet, in discovery order
// 4. Build the CrawlReport
//
// The crawl is depth-1: links found on secondary pages are never followed.
// Pages are fetched one at a time.
//
// Politeness:
// - Fixed delay after every link fetch (not before the root fetch)
// - Only same-site links are ever fetched
// =============================================================================

use crate::crawl::links::discover_links;
use crate::crawl::page::scrape_page;
use crate::crawl::report::{CrawlReport, CrawlTarget, PageEmails};
use crate::extract::FilterPolicy;
use crate::fetch::Fetcher;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_POLITENESS_DELAY: Duration = Duration::from_secs(1);

/// Settings that apply to every crawl in the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Pause after each discovered-link fetch.
    pub delay: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_POLITENESS_DELAY,
        }
    }
}

/// Runs depth-1 crawls. Holds no per-crawl state, so one Crawler can
/// process any number of domains.
#[derive(Debug, Clone)]
pub struct Crawler {
    fetcher: Fetcher,
    policy: FilterPolicy,
    config: CrawlConfig,
}

impl Crawler {
    pub fn new(fetcher: Fetcher, policy: FilterPolicy, config: CrawlConfig) -> Self {
        Self {
            fetcher,
            policy,
            config,
        }
    }

    // Crawls `root` and the pages it links to
    //
    // Never fails: unreachable pages just contribute nothing.
    pub async fn crawl(&self, root: CrawlTarget) -> CrawlReport {
        let mut visited = vec![root.clone()];
        let mut pages = Vec::new();

        info!(url = %root, "Scraping");
        self.record(&root, &mut pages).await;

        let links = discover_links(&self.fetcher, &root, &self.policy).await;
        info!(url = %root, count = links.len(), "Found links on root page");

        for link in links {
            if visited.contains(&link) {
                continue;
            }
            visited.push(link.clone());

            info!(url = %link, "Scraping");
            self.record(&link, &mut pages).await;

            if !self.config.delay.is_zero() {
                tokio::time::sleep(self.config.delay).await;
            }
        }

        let report = CrawlReport::new(visited, pages);
        info!(
            url = %root,
            visited = report.visited().len(),
            emails = report.all_emails().len(),
            "Crawl finished"
        );
        report
    }

    async fn record(&self, target: &CrawlTarget, pages: &mut Vec<PageEmails>) {
        let emails = scrape_page(&self.fetcher, target, &self.policy).await;
        if !emails.is_empty() {
            pages.push(PageEmails {
                target: target.clone(),
                emails,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::ClientConfig;
    use std::time::Instant;
    use url::Url;

    fn crawler() -> Crawler {
        crawler_with_delay(Duration::ZERO)
    }

    fn crawler_with_delay(delay: Duration) -> Crawler {
        Crawler::new(
            Fetcher::new(ClientConfig::default()).unwrap(),
            FilterPolicy::default(),
            CrawlConfig { delay },
        )
    }

    fn root(server: &mockito::ServerGuard) -> CrawlTarget {
        CrawlTarget::from_url(Url::parse(&server.url()).unwrap()).unwrap()
    }

    async fn html_page(server: &mut mockito::ServerGuard, path: &str, body: &str) -> mockito::Mock {
        server
            .mock("GET", path)
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(body)
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_root_and_linked_page() {
        let mut server = mockito::Server::new_async().await;
        html_page(
            &mut server,
            "/",
            r#"<p>Contact: sales@example.com</p><a href="/team">Team</a>"#,
        )
        .await;
        html_page(&mut server, "/team", r#"<a href="mailto:hr@example.com">HR</a>"#).await;

        let root = root(&server);
        let team = format!("{}/team", server.url());
        let report = crawler().crawl(root.clone()).await;

        let visited: Vec<&str> = report.visited().iter().map(|t| t.as_str()).collect();
        assert_eq!(visited, vec![root.as_str(), team.as_str()]);

        assert_eq!(report.emails_for(root.as_str()).unwrap().join(", "), "sales@example.com");
        assert_eq!(report.emails_for(&team).unwrap().join(", "), "hr@example.com");
        assert_eq!(report.all_emails().join(", "), "hr@example.com, sales@example.com");
    }

    #[tokio::test]
    async fn test_other_domain_never_visited() {
        let mut server = mockito::Server::new_async().await;
        html_page(
            &mut server,
            "/",
            r#"<a href="https://other-domain.com/contact">Partner</a> info@example.com"#,
        )
        .await;

        let report = crawler().crawl(root(&server)).await;

        assert_eq!(report.visited().len(), 1);
        assert!(report.visited().iter().all(|t| !t.as_str().contains("other-domain")));
        assert_eq!(report.all_emails().join(", "), "info@example.com");
    }

    #[tokio::test]
    async fn test_root_and_duplicates_fetched_once() {
        let mut server = mockito::Server::new_async().await;
        // The root is fetched twice: once to scrape, once to discover links
        let root_mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(r##"<a href="/">Home</a><a href="#top">Top</a><a href="/a">A</a><a href="/a#x">A again</a>"##)
            .expect(2)
            .create_async()
            .await;
        let a_mock = server
            .mock("GET", "/a")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(r#"<a href="/b">B is depth 2</a>"#)
            .expect(1)
            .create_async()
            .await;
        let b_mock = server.mock("GET", "/b").expect(0).create_async().await;

        let report = crawler().crawl(root(&server)).await;

        assert_eq!(report.visited().len(), 2);
        assert!(report.pages().is_empty());
        root_mock.assert_async().await;
        a_mock.assert_async().await;
        b_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_failing_link_does_not_stop_crawl() {
        let mut server = mockito::Server::new_async().await;
        html_page(&mut server, "/", r#"<a href="/down">Down</a><a href="/up">Up</a>"#).await;
        server
            .mock("GET", "/down")
            .with_status(503)
            .create_async()
            .await;
        html_page(&mut server, "/up", "jobs@example.com").await;

        let report = crawler().crawl(root(&server)).await;

        assert_eq!(report.visited().len(), 3);
        assert_eq!(report.pages().len(), 1);
        assert_eq!(report.all_emails().join(", "), "jobs@example.com");
    }

    #[tokio::test]
    async fn test_delay_after_each_link() {
        let mut server = mockito::Server::new_async().await;
        html_page(&mut server, "/", r#"<a href="/one">One</a><a href="/two">Two</a>"#).await;
        html_page(&mut server, "/one", "one@example.com").await;
        html_page(&mut server, "/two", "two@example.com").await;

        let delay = Duration::from_millis(200);
        let started = Instant::now();
        let report = crawler_with_delay(delay).crawl(root(&server)).await;

        assert_eq!(report.visited().len(), 3);
        assert!(started.elapsed() >= delay * 2);
    }

    #[tokio::test]
    async fn test_no_delay_for_root_only_crawl() {
        let mut server = mockito::Server::new_async().await;
        html_page(&mut server, "/", "<p>No links, info@example.com</p>").await;

        let delay = Duration::from_millis(500);
        let started = Instant::now();
        let report = crawler_with_delay(delay).crawl(root(&server)).await;

        assert_eq!(report.visited().len(), 1);
        assert!(started.elapsed() < delay);
    }

    #[tokio::test]
    async fn test_unreachable_root() {
        let root = CrawlTarget::from_url(Url::parse("http://127.0.0.1:1/").unwrap()).unwrap();
        let report = crawler().crawl(root).await;

        assert_eq!(report.visited().len(), 1);
        assert!(report.all_emails().is_empty());
    }
}
