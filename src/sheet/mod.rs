// src/sheet/mod.rs
// =============================================================================
// Batch processing over a sheet of seed domains.
//
// - store: reading seed rows, writing result rows
// - batch: the per-row crawl loop
// =============================================================================

mod batch;
mod store;

pub use batch::run_batch;
pub use store::{JsonLinesSink, RowRange, SeedFile};
