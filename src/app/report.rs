// PartLedger - app/report.rs
//
// Orchestrates one ledger read: file -> parse -> summarize -> aggregate.
// Every call re-reads the file; nothing is cached between calls.

use crate::core::model::TransactionReport;
use crate::core::parser::{parse_content, ParseConfig};
use crate::core::summary::{aggregate_totals, summarize};
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::{LedgerError, ParseError, Result};
use chrono::Utc;
use std::path::Path;

/// Options for loading a ledger file.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub parse: ParseConfig,
    /// Largest ledger file accepted, in bytes.
    pub max_file_size: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            parse: ParseConfig::default(),
            max_file_size: constants::DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// Read, parse, and summarise the ledger at `path`.
///
/// The file is fully read and closed before parsing starts.
pub fn load_report(path: &Path, options: &LoadOptions) -> Result<TransactionReport> {
    let content = fs::read_ledger(path, options.max_file_size)?;

    let report = build_report(&content, path, &options.parse).map_err(|source| {
        LedgerError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;

    tracing::info!(
        path = %path.display(),
        records = report.records.len(),
        check_ins = report.totals.check_ins,
        check_outs = report.totals.check_outs,
        skipped = report.skipped_lines,
        "Ledger loaded"
    );

    Ok(report)
}

/// Build a report from ledger content already in memory.
///
/// `source` is recorded in the report for display only.
pub fn build_report(
    content: &str,
    source: &Path,
    config: &ParseConfig,
) -> std::result::Result<TransactionReport, ParseError> {
    let parsed = parse_content(content, config)?;
    let skipped_lines = parsed.error_count();

    let mut warnings: Vec<String> = parsed.errors.iter().map(ToString::to_string).collect();
    if parsed.suppressed_errors > 0 {
        warnings.push(format!(
            "{} further malformed line(s) were skipped but not listed",
            parsed.suppressed_errors
        ));
    }

    let summaries = summarize(&parsed.records);
    let totals = aggregate_totals(&summaries);

    Ok(TransactionReport {
        source: source.to_path_buf(),
        generated_at: Utc::now(),
        records: parsed.records,
        summaries,
        totals,
        warnings,
        skipped_lines,
    })
}
