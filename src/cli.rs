// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - site:  crawl a single domain and print what was found
// - batch: crawl every seed in a range of rows and write result rows
//
// Crawl settings (timeout, delay, user agent, extra asset types) are global
// flags, so both subcommands share them. Each one can also come from a
// MAIL_HARVEST_* environment variable.
// =============================================================================

use crate::crawl::CrawlConfig;
use crate::extract::FilterPolicy;
use crate::fetch::{ClientConfig, DEFAULT_USER_AGENT};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "mail-harvest",
    version,
    about = "Harvest public contact email addresses from organization websites",
    long_about = "mail-harvest visits a domain's home page and every same-site page it links to, \
                  and collects the email addresses published there."
)]
pub struct Cli {
    #[command(flatten)]
    pub settings: CrawlSettings,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct CrawlSettings {
    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "MAIL_HARVEST_TIMEOUT", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Pause between link fetches within one crawl, in milliseconds
    #[arg(long, global = true, env = "MAIL_HARVEST_DELAY_MS", default_value_t = 1000)]
    pub delay_ms: u64,

    /// User-Agent header sent with every request
    #[arg(long, global = true, env = "MAIL_HARVEST_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Extra file extension to treat as a static asset (repeatable)
    ///
    /// Example: --exclude-ext zip --exclude-ext docx
    #[arg(long = "exclude-ext", global = true, value_name = "EXT")]
    pub exclude_ext: Vec<String>,

    /// Log at debug level (RUST_LOG overrides this)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,
}

impl CrawlSettings {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
            ..ClientConfig::default()
        }
    }

    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig {
            delay: Duration::from_millis(self.delay_ms),
        }
    }

    pub fn filter_policy(&self) -> FilterPolicy {
        FilterPolicy::default().with_extra_extensions(&self.exclude_ext)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl one domain and print the emails found
    ///
    /// Example: mail-harvest site example.com
    Site {
        /// Domain or URL (http:// is assumed when no scheme is given)
        domain: String,

        /// Output the full report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Crawl every seed in a file of rows and write one JSON line per row
    ///
    /// Example: mail-harvest batch seeds.csv --start-row 2 --end-row 40 -o out.jsonl
    Batch {
        /// Text or CSV file; the first cell of line N is the seed for row N
        seeds: PathBuf,

        /// First row to process (1-based)
        #[arg(long, default_value_t = 1)]
        start_row: usize,

        /// Last row to process, inclusive (default: last row in the file)
        #[arg(long)]
        end_row: Option<usize>,

        /// Write results here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}
