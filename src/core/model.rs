// PartLedger - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

// =============================================================================
// Part Record (one header line plus its event lines)
// =============================================================================

/// One physical part unit as recorded in the ledger.
///
/// Built from a header line; `events` holds the tab-indented lines that
/// follow it, in file order. `part_id` is a catalogue number and is not
/// unique across records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartRecord {
    /// Opaque identifier, unique per part instance.
    pub unique_hash: String,

    /// Catalogue identifier.
    pub part_id: String,

    /// Human-readable name.
    pub part_name: String,

    /// Quantity exactly as written in the ledger. Not validated.
    pub quantity: String,

    /// Supplier name.
    pub supplier: String,

    /// Check-in / check-out events in file order.
    pub events: Vec<PartEvent>,

    /// 1-based line number of the header line.
    pub line_number: u64,
}

impl PartRecord {
    /// Numeric view of `quantity`, when it is a plain non-negative integer.
    pub fn quantity_value(&self) -> Option<u64> {
        self.quantity.parse().ok()
    }

    /// Number of events of kind `IN`.
    pub fn check_ins(&self) -> usize {
        self.events.iter().filter(|e| e.is_check_in()).count()
    }

    /// Number of events of kind `OUT`.
    pub fn check_outs(&self) -> usize {
        self.events.iter().filter(|e| e.is_check_out()).count()
    }
}

// =============================================================================
// Part Event
// =============================================================================

/// A single check-in or check-out line.
///
/// All fields are kept verbatim. `event_kind` is `IN` or `OUT` by convention
/// but any string is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartEvent {
    /// Free-form timestamp text.
    pub timestamp: String,

    /// Event kind, compared case-sensitively.
    pub event_kind: String,

    /// Person or badge that performed the movement.
    pub operator: String,

    /// 1-based line number of the event line.
    pub line_number: u64,
}

impl PartEvent {
    pub fn is_check_in(&self) -> bool {
        self.event_kind == constants::EVENT_KIND_IN
    }

    pub fn is_check_out(&self) -> bool {
        self.event_kind == constants::EVENT_KIND_OUT
    }
}

// =============================================================================
// Summaries
// =============================================================================

/// Per-part transaction counts, one row of the summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartSummary {
    pub unique_hash: String,
    pub part_id: String,
    pub part_name: String,
    pub supplier: String,
    pub quantity: String,

    /// Events with kind exactly `IN`.
    pub check_ins: usize,

    /// Events with kind exactly `OUT`.
    pub check_outs: usize,

    /// All events, including kinds other than `IN` and `OUT`.
    pub total_events: usize,
}

impl PartSummary {
    /// Events whose kind is neither `IN` nor `OUT`.
    pub fn other_events(&self) -> usize {
        self.total_events - self.check_ins - self.check_outs
    }
}

/// Check-in and check-out totals across a set of summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransactionTotals {
    pub check_ins: usize,
    pub check_outs: usize,
}

impl TransactionTotals {
    pub fn total(&self) -> usize {
        self.check_ins + self.check_outs
    }

    /// Two-category distribution of the totals (check-ins first).
    ///
    /// Fractions are 0.0 when there are no transactions at all.
    pub fn distribution(&self) -> [DistributionSlice; 2] {
        let total = self.total();
        let fraction = |count: usize| {
            if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            }
        };
        [
            DistributionSlice {
                label: constants::LABEL_CHECK_INS,
                count: self.check_ins,
                fraction: fraction(self.check_ins),
            },
            DistributionSlice {
                label: constants::LABEL_CHECK_OUTS,
                count: self.check_outs,
                fraction: fraction(self.check_outs),
            },
        ]
    }
}

/// One labelled category of the overall distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistributionSlice {
    pub label: &'static str,
    pub count: usize,
    /// Share of the total, in `0.0..=1.0`.
    pub fraction: f64,
}

/// Check-in/out counts for every record sharing one part name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartNameGroup {
    pub part_name: String,
    /// Number of records (physical units) with this name.
    pub units: usize,
    pub check_ins: usize,
    pub check_outs: usize,
}

// =============================================================================
// Transaction Report
// =============================================================================

/// Everything derived from one read of a ledger file.
///
/// Built fresh on every load; nothing is cached between reads.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionReport {
    /// Path of the ledger file that was read.
    pub source: PathBuf,

    /// When the file was read and parsed.
    pub generated_at: DateTime<Utc>,

    /// Parsed records in header order.
    pub records: Vec<PartRecord>,

    /// One summary per record, same order as `records`.
    pub summaries: Vec<PartSummary>,

    /// Totals over `summaries`.
    pub totals: TransactionTotals,

    /// Lines skipped in lenient mode, rendered as messages.
    pub warnings: Vec<String>,

    /// Skipped lines, including those beyond the stored-warning cap.
    pub skipped_lines: usize,
}

impl TransactionReport {
    /// Whether any line was skipped while parsing.
    pub fn is_partial(&self) -> bool {
        self.skipped_lines > 0
    }
}
