// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, so stdout stays clean for results)
// 3. Build the HTTP client and crawler once, from the global flags
// 4. Dispatch to the appropriate subcommand handler
// 5. Exit with proper code (0 = success, 1 = nothing found / some rows
//    not stored, 2 = error)
// =============================================================================

mod cli;
mod crawl;
mod extract;
mod fetch;
mod sheet;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, CrawlSettings};
use crawl::{normalize_seed, CrawlReport, Crawler};
use fetch::Fetcher;
use sheet::{JsonLinesSink, RowRange, SeedFile};
use std::path::Path;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(&cli.settings);

    let fetcher = Fetcher::new(cli.settings.client_config())?;
    let crawler = Crawler::new(
        fetcher,
        cli.settings.filter_policy(),
        cli.settings.crawl_config(),
    );

    match cli.command {
        Commands::Site { domain, json } => handle_site(&crawler, &domain, json).await,
        Commands::Batch {
            seeds,
            start_row,
            end_row,
            output,
        } => {
            let range = RowRange::new(start_row, end_row)?;
            handle_batch(&crawler, &seeds, range, output.as_deref()).await
        }
    }
}

// Logs go to stderr; RUST_LOG wins over --verbose
fn init_tracing(settings: &CrawlSettings) {
    let default_level = if settings.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,mail_harvest={}", default_level)));

    if settings.log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false).json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init()
            .ok();
    }
}

// Handles the 'site' subcommand
// Returns Ok(0) when at least one email was found, Ok(1) otherwise
async fn handle_site(crawler: &Crawler, domain: &str, json: bool) -> Result<i32> {
    let root = normalize_seed(domain).with_context(|| format!("Cannot crawl '{}'", domain))?;

    let report = crawler.crawl(root).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_table(&report);
    }

    Ok(if report.all_emails().is_empty() { 1 } else { 0 })
}

// Handles the 'batch' subcommand
// Returns Ok(0) when every crawled row was stored, Ok(1) if any write failed
async fn handle_batch(
    crawler: &Crawler,
    seeds: &Path,
    range: RowRange,
    output: Option<&Path>,
) -> Result<i32> {
    let source = SeedFile::open(seeds)?;
    let mut sink = match output {
        Some(path) => JsonLinesSink::create(path)?,
        None => JsonLinesSink::stdout(),
    };

    let summary = sheet::run_batch(crawler, &source, &mut sink, range).await?;

    eprintln!(
        "📊 Crawled {} domain(s), skipped {} row(s), stored {}, failed {}",
        summary.crawled, summary.skipped, summary.written, summary.failed_writes
    );

    Ok(if summary.failed_writes > 0 { 1 } else { 0 })
}

// Prints a report as a human-readable table in the terminal
fn print_table(report: &CrawlReport) {
    println!("{:<60} {:<40}", "URL", "EMAILS");
    println!("{}", "=".repeat(100));

    for target in report.visited() {
        let url = target.as_str();
        let url_display = if url.chars().count() > 57 {
            format!("{}...", url.chars().take(57).collect::<String>())
        } else {
            url.to_string()
        };

        let emails = report
            .emails_for(url)
            .map(|set| set.join(", "))
            .unwrap_or_else(|| "-".to_string());

        println!("{:<60} {:<40}", url_display, emails);
    }

    println!();
    println!("📊 Summary:");
    println!("   🔗 Pages scraped: {}", report.visited().len());
    println!("   📄 Pages with emails: {}", report.pages().len());
    println!("   ✉️  Unique emails: {}", report.all_emails().len());
    if !report.all_emails().is_empty() {
        println!("   {}", report.all_emails().join(", "));
    }
}
