//! End-to-end digest pipeline: source table → fetch → extract → output table.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, instrument, warn};

use filingdigest_fetch::{DocumentFetcher, FetchOptions};
use filingdigest_shared::{AppConfig, FilingDigestError, FilingRecord, Result};
use filingdigest_table::{SourceTable, write_records};

use crate::document::{is_xml_source, summarize_document};

/// Configuration for the `run_digest` pipeline.
#[derive(Debug, Clone)]
pub struct DigestConfig {
    /// Source table to read.
    pub input_path: PathBuf,
    /// Output table to write.
    pub output_path: PathBuf,
    /// Column holding per-row document URLs.
    pub source_column: String,
    /// Field delimiter for both tables.
    pub delimiter: u8,
    /// Request settings for document fetches.
    pub fetch: FetchOptions,
}

impl TryFrom<&AppConfig> for DigestConfig {
    type Error = FilingDigestError;

    fn try_from(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            input_path: PathBuf::from(&config.defaults.input_path),
            output_path: PathBuf::from(&config.defaults.output_path),
            source_column: config.table.source_column.clone(),
            delimiter: config.table.delimiter_byte()?,
            fetch: FetchOptions::from(config),
        })
    }
}

/// Result of the `run_digest` pipeline.
#[derive(Debug)]
pub struct DigestResult {
    /// Data rows in the source table.
    pub rows_read: usize,
    /// Rows skipped because their source cell was missing or not XML.
    pub rows_skipped: usize,
    /// Documents that failed to fetch or parse (URL, error message).
    pub failures: Vec<(String, String)>,
    /// Rows written to the output table.
    pub records_written: usize,
    /// Where the output table was written.
    pub output_path: PathBuf,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called before each document fetch.
    fn document_started(&self, url: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, result: &DigestResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn document_started(&self, _url: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &DigestResult) {}
}

/// Run the full digest pipeline.
///
/// 1. Read the source table
/// 2. Fetch and extract each XML source, one at a time, skipping failures
/// 3. Write the output table
///
/// Only an unreadable source table or an unwritable output table fails the
/// run; per-document failures are logged and collected in the result.
#[instrument(skip_all, fields(input = %config.input_path.display(), output = %config.output_path.display()))]
pub async fn run_digest(
    config: &DigestConfig,
    progress: &dyn ProgressReporter,
) -> Result<DigestResult> {
    let start = Instant::now();

    // --- Phase 1: Source table ---
    progress.phase("Reading source table");
    let table = SourceTable::open(&config.input_path, config.delimiter)?;

    if !table.has_column(&config.source_column) {
        warn!(
            column = %config.source_column,
            "source column not found in table header, no documents will be fetched"
        );
    }

    let sources: Vec<&str> = table
        .rows()
        .filter_map(|row| row.get(&config.source_column))
        .filter(|value| is_xml_source(value))
        .collect();

    info!(
        rows = table.len(),
        documents = sources.len(),
        "source table read"
    );

    // --- Phase 2: Fetch + extract ---
    progress.phase("Fetching source documents");
    let fetcher = DocumentFetcher::new(&config.fetch)?;
    let mut records: Vec<FilingRecord> = Vec::with_capacity(sources.len());
    let mut failures: Vec<(String, String)> = Vec::new();
    let total = sources.len();

    for (i, url) in sources.iter().enumerate() {
        progress.document_started(url, i + 1, total);

        match summarize_document(&fetcher, url).await {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(url = %url, error = %e, "skipping source document");
                failures.push((url.to_string(), e.to_string()));
            }
        }
    }

    // --- Phase 3: Output table ---
    progress.phase("Writing output table");
    let records_written = write_records(&config.output_path, &records, config.delimiter)?;

    let result = DigestResult {
        rows_read: table.len(),
        rows_skipped: table.len() - total,
        failures,
        records_written,
        output_path: config.output_path.clone(),
        elapsed: start.elapsed(),
    };

    info!(
        records_written = result.records_written,
        rows_skipped = result.rows_skipped,
        failures = result.failures.len(),
        duration_ms = result.elapsed.as_millis(),
        "digest completed"
    );

    progress.done(&result);
    Ok(result)
}
