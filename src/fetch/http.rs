// src/fetch/http.rs
// =============================================================================
// This module fetches HTML pages over HTTP.
//
// Key functionality:
// - One reqwest Client per process, built from an immutable ClientConfig
// - Browser-like User-Agent (some sites reject obvious bots)
// - Per-request timeout, limited redirects
// - Only 2xx responses with a text/html content type count as pages
// - Every other outcome becomes a FetchError describing what went wrong
//
// Callers (the page scraper and the link discoverer) decide what a failure
// means; this module never retries and never logs.
// =============================================================================

use reqwest::{header::CONTENT_TYPE, Client};
use std::error::Error as _;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// A desktop Chrome user agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// HTTP settings shared by every fetch in the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub user_agent: String,
    pub max_redirects: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

/// Why a page could not be used.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("too many redirects")]
    TooManyRedirects,
    #[error("could not resolve hostname")]
    Dns,
    #[error("SSL certificate error")]
    Tls,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("not an HTML page (content-type: {0})")]
    NotHtml(String),
    #[error("failed to read response body: {0}")]
    Body(String),
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    #[error("{0}")]
    Other(String),
}

impl FetchError {
    /// Non-HTML content is an expected outcome, not a failure of the site.
    pub fn is_not_html(&self) -> bool {
        matches!(self, FetchError::NotHtml(_))
    }
}

/// Performs GET requests with the configured client.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    // Fetches `url` and returns its body if it is an HTML page
    //
    // Returns:
    //   Ok(body) for a 2xx text/html response
    //   Err(Status) for any non-2xx response
    //   Err(NotHtml) for a 2xx response with another (or no) content type;
    //     the body is not downloaded in that case
    //   Err(...) for transport failures, categorized like categorize_error
    pub async fn fetch_html(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !is_html_content_type(&content_type) {
            return Err(FetchError::NotHtml(if content_type.is_empty() {
                "none".to_string()
            } else {
                content_type
            }));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))
    }
}

// "text/html", "text/html; charset=utf-8", "TEXT/HTML" are all HTML
fn is_html_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("text/html"))
}

// Categorizes different error types from reqwest
//
// reqwest wraps hyper/rustls errors, so the interesting detail (DNS,
// certificate) is usually in the source chain rather than the top-level
// message. We flatten the chain before looking at it.
fn categorize_error(error: reqwest::Error) -> FetchError {
    let detail = error_chain(&error);
    let lower = detail.to_lowercase();

    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_redirect() {
        FetchError::TooManyRedirects
    } else if lower.contains("certificate") || lower.contains("ssl") || lower.contains("tls") {
        FetchError::Tls
    } else if error.is_connect() {
        if lower.contains("dns") || lower.contains("failed to lookup") {
            FetchError::Dns
        } else {
            FetchError::Connect(detail)
        }
    } else if error.is_body() || error.is_decode() {
        FetchError::Body(detail)
    } else {
        FetchError::Other(detail)
    }
}

fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> Fetcher {
        Fetcher::new(ClientConfig::default()).expect("client builds")
    }

    #[test]
    fn test_html_content_types() {
        assert!(is_html_content_type("text/html"));
        assert!(is_html_content_type("text/html; charset=UTF-8"));
        assert!(is_html_content_type("TEXT/HTML"));
        assert!(!is_html_content_type("application/pdf"));
        assert!(!is_html_content_type("application/xhtml+xml"));
        assert!(!is_html_content_type(""));
    }

    #[tokio::test]
    async fn test_fetch_html_ok() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("user-agent", DEFAULT_USER_AGENT)
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body("<p>hello</p>")
            .create_async()
            .await;

        let url = Url::parse(&server.url()).unwrap();
        let body = fetcher().fetch_html(&url).await.unwrap();

        assert_eq!(body, "<p>hello</p>");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_html_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/broken")
            .with_status(500)
            .with_header("content-type", "text/html")
            .create_async()
            .await;

        let url = Url::parse(&format!("{}/broken", server.url())).unwrap();
        let err = fetcher().fetch_html(&url).await.unwrap_err();

        assert!(matches!(err, FetchError::Status(500)));
    }

    #[tokio::test]
    async fn test_fetch_html_rejects_pdf() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/doc")
            .with_status(200)
            .with_header("content-type", "application/pdf")
            .with_body("%PDF-1.4 sales@example.com")
            .create_async()
            .await;

        let url = Url::parse(&format!("{}/doc", server.url())).unwrap();
        let err = fetcher().fetch_html(&url).await.unwrap_err();

        assert!(err.is_not_html());
    }

    #[tokio::test]
    async fn test_fetch_html_connection_refused() {
        // Port 1 is reserved and nothing listens on it in test environments
        let url = Url::parse("http://127.0.0.1:1/").unwrap();
        let result = fetcher().fetch_html(&url).await;

        assert!(result.is_err());
        assert!(!result.unwrap_err().is_not_html());
    }
}
