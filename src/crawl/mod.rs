// src/crawl/mod.rs
// =============================================================================
// This module handles crawling one organization's website.
//
// Submodules:
// - scope: same-site test (two-label registrable domain)
// - links: in-scope link discovery on the root page
// - page: email scraping of a single page
// - queue: the depth-1 crawl over root + its links
// - report: targets, reports and result rows
// =============================================================================

pub mod links;
pub mod page;
mod queue;
pub mod report;
pub mod scope;

pub use queue::{CrawlConfig, Crawler};
pub use report::{normalize_seed, CrawlReport, ResultRow, SeedError};
