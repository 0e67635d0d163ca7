// PartLedger - app/state.rs
//
// Transaction view state handed to a presentation layer: the latest report
// (full, partial, or empty), an error indicator, and the current filter.
// Loading never fails; failures become an empty view with `error` set.

use crate::app::report::{load_report, LoadOptions};
use crate::core::filter::{apply_filter, PartFilter};
use crate::core::model::{PartRecord, PartSummary, TransactionReport, TransactionTotals};
use crate::core::summary::aggregate_totals;
use std::path::{Path, PathBuf};

/// What a presentation layer renders for the parts-transactions page.
#[derive(Debug)]
pub struct TransactionView {
    /// Ledger file the view was loaded from.
    pub source: PathBuf,

    /// The loaded report. `None` when loading failed.
    pub report: Option<TransactionReport>,

    /// Visible error indicator when loading failed.
    pub error: Option<String>,

    /// Current filter configuration.
    pub filter: PartFilter,

    /// Indices of records matching the current filter (into `report.records`).
    pub filtered_indices: Vec<usize>,
}

impl TransactionView {
    /// Load the ledger at `path`. Never fails.
    pub fn load(path: &Path, options: &LoadOptions) -> Self {
        match load_report(path, options) {
            Ok(report) => Self::from_report(report),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Ledger could not be loaded");
                Self {
                    source: path.to_path_buf(),
                    report: None,
                    error: Some(e.to_string()),
                    filter: PartFilter::default(),
                    filtered_indices: Vec::new(),
                }
            }
        }
    }

    /// Wrap an already-loaded report, with no filter applied.
    pub fn from_report(report: TransactionReport) -> Self {
        let mut view = Self {
            source: report.source.clone(),
            report: Some(report),
            error: None,
            filter: PartFilter::default(),
            filtered_indices: Vec::new(),
        };
        view.apply_filter();
        view
    }

    /// Replace the filter and recompute the visible rows.
    pub fn set_filter(&mut self, filter: PartFilter) {
        self.filter = filter;
        self.apply_filter();
    }

    /// Recompute filtered indices from the report and filter.
    pub fn apply_filter(&mut self) {
        self.filtered_indices = match self.report {
            Some(ref report) => apply_filter(&report.records, &self.filter),
            None => Vec::new(),
        };
    }

    /// Whether lines were skipped while parsing.
    pub fn is_partial(&self) -> bool {
        self.report.as_ref().is_some_and(TransactionReport::is_partial)
    }

    /// Parse warnings of the loaded report (empty when none or not loaded).
    pub fn warnings(&self) -> &[String] {
        match self.report {
            Some(ref report) => &report.warnings,
            None => &[],
        }
    }

    /// Records passing the filter, in ledger order.
    pub fn visible_records(&self) -> Vec<&PartRecord> {
        match self.report {
            Some(ref report) => self
                .filtered_indices
                .iter()
                .filter_map(|&idx| report.records.get(idx))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Summary rows passing the filter, in ledger order.
    pub fn visible_summaries(&self) -> Vec<PartSummary> {
        match self.report {
            Some(ref report) => self
                .filtered_indices
                .iter()
                .filter_map(|&idx| report.summaries.get(idx).cloned())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Totals over the visible rows.
    pub fn visible_totals(&self) -> TransactionTotals {
        aggregate_totals(&self.visible_summaries())
    }

    /// Copy of the report restricted to the visible rows, for export.
    pub fn filtered_report(&self) -> Option<TransactionReport> {
        let report = self.report.as_ref()?;
        let summaries = self.visible_summaries();
        Some(TransactionReport {
            records: self.visible_records().into_iter().cloned().collect(),
            totals: aggregate_totals(&summaries),
            summaries,
            ..report.clone()
        })
    }
}
