// src/sheet/batch.rs
// =============================================================================
// Processes a range of seed rows, one domain at a time.
//
// For each row:
//   empty cell         -> skipped, nothing written
//   unparsable seed    -> skipped with a warning
//   anything else      -> crawled, result row written to the sink
//
// A failed write is logged and counted, then the batch moves on. The batch
// ends only when every selected row has been attempted.
// =============================================================================

use crate::crawl::{normalize_seed, Crawler, SeedError};
use crate::sheet::store::{ResultSink, RowRange, SeedSource};
use anyhow::Result;
use tracing::{debug, error, info, warn};

/// Counts for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub crawled: usize,
    pub skipped: usize,
    pub written: usize,
    pub failed_writes: usize,
}

pub async fn run_batch<S, K>(
    crawler: &Crawler,
    source: &S,
    sink: &mut K,
    range: RowRange,
) -> Result<BatchSummary>
where
    S: SeedSource + ?Sized,
    K: ResultSink + ?Sized,
{
    let rows = source.seed_rows(range)?;
    let mut summary = BatchSummary::default();

    for row in rows {
        let root = match normalize_seed(&row.seed) {
            Ok(root) => root,
            Err(SeedError::Empty) => {
                debug!(row = row.row, "Skipping empty row");
                summary.skipped += 1;
                continue;
            }
            Err(e) => {
                warn!(row = row.row, error = %e, "Skipping row");
                summary.skipped += 1;
                continue;
            }
        };

        info!(row = row.row, seed = %row.seed, "Processing");
        let report = crawler.crawl(root).await;
        summary.crawled += 1;

        match sink.write_row(&row, &report.to_result_row()) {
            Ok(()) => summary.written += 1,
            Err(e) => {
                error!(row = row.row, error = %format!("{e:#}"), "Failed to store result");
                summary.failed_writes += 1;
            }
        }
    }

    info!(
        crawled = summary.crawled,
        skipped = summary.skipped,
        written = summary.written,
        failed_writes = summary.failed_writes,
        "Batch finished"
    );
    Ok(summary)
}
