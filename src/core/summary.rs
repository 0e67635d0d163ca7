// PartLedger - core/summary.rs
//
// Per-part and overall transaction counts derived from parsed records.
// Core layer: pure functions of their input.

use crate::core::model::{PartNameGroup, PartRecord, PartSummary, TransactionTotals};

/// Build one summary row per record, preserving record order.
pub fn summarize(records: &[PartRecord]) -> Vec<PartSummary> {
    records
        .iter()
        .map(|record| PartSummary {
            unique_hash: record.unique_hash.clone(),
            part_id: record.part_id.clone(),
            part_name: record.part_name.clone(),
            supplier: record.supplier.clone(),
            quantity: record.quantity.clone(),
            check_ins: record.check_ins(),
            check_outs: record.check_outs(),
            total_events: record.events.len(),
        })
        .collect()
}

/// Sum check-ins and check-outs across all summaries.
pub fn aggregate_totals(summaries: &[PartSummary]) -> TransactionTotals {
    summaries
        .iter()
        .fold(TransactionTotals::default(), |acc, s| TransactionTotals {
            check_ins: acc.check_ins + s.check_ins,
            check_outs: acc.check_outs + s.check_outs,
        })
}

/// Combine summaries that share a part name, in first-seen order.
///
/// Several physical units can carry the same name; this is the series shape
/// for a per-part check-in/check-out bar chart.
pub fn group_by_part_name(summaries: &[PartSummary]) -> Vec<PartNameGroup> {
    let mut groups: Vec<PartNameGroup> = Vec::new();

    for summary in summaries {
        match groups.iter_mut().find(|g| g.part_name == summary.part_name) {
            Some(group) => {
                group.units += 1;
                group.check_ins += summary.check_ins;
                group.check_outs += summary.check_outs;
            }
            None => groups.push(PartNameGroup {
                part_name: summary.part_name.clone(),
                units: 1,
                check_ins: summary.check_ins,
                check_outs: summary.check_outs,
            }),
        }
    }

    groups
}
