// src/fetch/mod.rs
// =============================================================================
// HTTP access for the crawler.
//
// Everything network-facing goes through a single Fetcher so that timeout,
// user agent and redirect policy are decided once, at startup.
// =============================================================================

mod http;

pub use http::{ClientConfig, Fetcher, DEFAULT_USER_AGENT};
