//! CSV source and output tables.
//!
//! The source table is loaded whole, every cell kept as text, rows in file
//! order. The output table is written once, header first, one row per
//! [`FilingRecord`](filingdigest_shared::FilingRecord).

mod writer;

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use filingdigest_shared::{FilingDigestError, Result};
use tracing::{debug, instrument};

pub use writer::write_records;

// ---------------------------------------------------------------------------
// SourceTable
// ---------------------------------------------------------------------------

/// A fully loaded source table.
#[derive(Debug, Clone)]
pub struct SourceTable {
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl SourceTable {
    /// Load the table at `path`. The first row is the header.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn open(path: &Path, delimiter: u8) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| FilingDigestError::io(path, e))?;

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| FilingDigestError::table(path, e.to_string()))?
            .clone();

        let rows = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| FilingDigestError::table(path, e.to_string()))?;

        debug!(columns = headers.len(), rows = rows.len(), "source table loaded");

        Ok(Self { headers, rows })
    }

    /// Column names, in file order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter()
    }

    /// Whether a column named exactly `name` exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has a header but no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Data rows in file order.
    pub fn rows(&self) -> impl Iterator<Item = SourceRow<'_>> {
        self.rows.iter().map(|record| SourceRow {
            table: self,
            record,
        })
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// One data row, addressable by column name.
#[derive(Debug, Clone, Copy)]
pub struct SourceRow<'a> {
    table: &'a SourceTable,
    record: &'a StringRecord,
}

impl<'a> SourceRow<'a> {
    /// Cell text under `column`; `None` if the column does not exist or this
    /// row is too short to reach it.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = self.table.column_index(column)?;
        self.record.get(idx)
    }
}
