//! Row sinks: where flattened rows end up
//!
//! The CLI streams rows into a CSV file page by page; the hosted-function
//! variant accumulates them in memory and returns them to the caller.

use crate::{
    error::FetchResult,
    types::{FlatRow, CSV_COLUMNS},
};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Destination for flattened rows. Pages arrive in order; `first_page` is
/// true exactly once per run, for the page at offset 0.
pub trait RowSink {
    fn write_rows(&mut self, rows: &[FlatRow], first_page: bool) -> FetchResult<()>;
}

/// Appends rows to a CSV file on disk, writing the column header only for
/// the first page of a run. Comma-delimited, double quotes on demand.
#[derive(Debug)]
pub struct CsvFileSink {
    path: PathBuf,
}

impl CsvFileSink {
    /// Sink writing to a caller-supplied path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Sink with the conventional file name `<term>_<location>_<date>.csv`,
    /// dated today.
    pub fn for_search(term: &str, location: &str) -> Self {
        let today = chrono::Local::now().format("%m-%d-%Y");
        Self::new(format!("{term}_{location}_{today}.csv"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RowSink for CsvFileSink {
    fn write_rows(&mut self, rows: &[FlatRow], first_page: bool) -> FetchResult<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if first_page {
            writer.write_record(CSV_COLUMNS)?;
        }
        for row in rows {
            writer.write_record(row.fields())?;
        }
        writer.flush()?;

        Ok(())
    }
}

/// Accumulates rows in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    rows: Vec<FlatRow>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[FlatRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<FlatRow> {
        self.rows
    }
}

impl RowSink for MemorySink {
    fn write_rows(&mut self, rows: &[FlatRow], _first_page: bool) -> FetchResult<()> {
        self.rows.extend_from_slice(rows);
        Ok(())
    }
}
