//! Output table writer.

use std::path::Path;

use csv::{Terminator, WriterBuilder};
use filingdigest_shared::{FilingDigestError, FilingRecord, OUTPUT_COLUMNS, Result};
use tracing::{info, instrument};

/// Write `records` to `path` as a CSV table, replacing any existing file.
///
/// The header row is always written, so zero records still produce a valid
/// table. Returns the number of data rows written.
#[instrument(skip(records), fields(path = %path.display(), records = records.len()))]
pub fn write_records(path: &Path, records: &[FilingRecord], delimiter: u8) -> Result<usize> {
    let table_err = |e: csv::Error| FilingDigestError::table(path, e.to_string());

    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(Terminator::Any(b'\n'))
        .has_headers(false)
        .from_path(path)
        .map_err(table_err)?;

    writer.write_record(OUTPUT_COLUMNS).map_err(table_err)?;
    for record in records {
        writer.serialize(record).map_err(table_err)?;
    }
    writer
        .flush()
        .map_err(|e| FilingDigestError::io(path, e))?;

    info!(rows = records.len(), "output table written");
    Ok(records.len())
}
