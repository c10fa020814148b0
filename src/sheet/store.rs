// src/sheet/store.rs
// =============================================================================
// The row store the batch reads seeds from and writes results to.
//
// Seeds come from a plain text file where line N is row N. Only the first
// cell of a line is used (cells are split on ',' or tab), so a CSV export of
// a spreadsheet works as-is. Lines starting with '#' count as empty rows.
//
// Results go out as JSON lines: one object per processed row with the row
// number, the seed as written, and the three result fields.
// =============================================================================

use crate::crawl::ResultRow;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// One input row. `seed` may be empty; the batch skips those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRow {
    pub row: usize,
    pub seed: String,
}

/// 1-based, inclusive row selection. `end: None` means "to the last row".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    start: usize,
    end: Option<usize>,
}

impl RowRange {
    pub fn new(start: usize, end: Option<usize>) -> Result<Self> {
        if start == 0 {
            bail!("rows are numbered from 1");
        }
        if let Some(end) = end {
            if end < start {
                bail!("end row {} is before start row {}", end, start);
            }
        }
        Ok(Self { start, end })
    }

    #[cfg(test)]
    pub fn all() -> Self {
        Self { start: 1, end: None }
    }

    pub fn contains(&self, row: usize) -> bool {
        row >= self.start && self.end.map_or(true, |end| row <= end)
    }
}

/// Where seed domains come from.
pub trait SeedSource {
    fn seed_rows(&self, range: RowRange) -> Result<Vec<SeedRow>>;
}

/// Where per-domain results go.
pub trait ResultSink {
    fn write_row(&mut self, row: &SeedRow, result: &ResultRow) -> Result<()>;
}

/// Seeds loaded from a text/CSV file.
#[derive(Debug, Clone)]
pub struct SeedFile {
    lines: Vec<String>,
}

impl SeedFile {
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        Ok(Self::from_text(&content))
    }

    pub fn from_text(content: &str) -> Self {
        Self {
            lines: content.lines().map(|line| line.to_string()).collect(),
        }
    }
}

impl SeedSource for SeedFile {
    fn seed_rows(&self, range: RowRange) -> Result<Vec<SeedRow>> {
        Ok(self
            .lines
            .iter()
            .enumerate()
            .map(|(index, line)| (index + 1, line))
            .filter(|(row, _)| range.contains(*row))
            .map(|(row, line)| SeedRow {
                row,
                seed: first_cell(line),
            })
            .collect())
    }
}

// "example.com, Acme Inc"   -> "example.com"
// "\"example.com\"\tnotes"  -> "example.com"
// "# comment"               -> ""
fn first_cell(line: &str) -> String {
    let line = line.trim();
    if line.starts_with('#') {
        return String::new();
    }
    line.split([',', '\t'])
        .next()
        .unwrap_or("")
        .trim()
        .trim_matches('"')
        .trim()
        .to_string()
}

#[derive(Serialize)]
struct ResultRecord<'a> {
    row: usize,
    seed: &'a str,
    #[serde(flatten)]
    result: &'a ResultRow,
}

/// Writes one JSON object per line.
pub struct JsonLinesSink {
    writer: Box<dyn Write + Send>,
}

impl JsonLinesSink {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file {}", path.display()))?;
        Ok(Self::new(Box::new(BufWriter::new(file))))
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self { writer }
    }
}

impl ResultSink for JsonLinesSink {
    fn write_row(&mut self, row: &SeedRow, result: &ResultRow) -> Result<()> {
        let record = ResultRecord {
            row: row.row,
            seed: &row.seed,
            result,
        };
        serde_json::to_writer(&mut self.writer, &record)
            .with_context(|| format!("Failed to serialize row {}", row.row))?;
        self.writer.write_all(b"\n")?;
        // Flush per row so a crash mid-batch keeps everything written so far
        self.writer
            .flush()
            .with_context(|| format!("Failed to write row {}", row.row))?;
        Ok(())
    }
}
