// PartLedger - app/render.rs
//
// Plain-text rendering of a transaction view for terminal output:
// summary table, per-part-name counts, and the overall distribution.

use crate::app::state::TransactionView;
use crate::core::model::{PartSummary, TransactionTotals};
use crate::core::summary::group_by_part_name;
use std::fmt::Write;

const TABLE_HEADERS: [&str; 7] = [
    "Unique Hash",
    "Part ID",
    "Part Name",
    "Supplier",
    "Quantity",
    "Check-Ins",
    "Check-Outs",
];

/// Render the whole view as text.
pub fn render_view(view: &TransactionView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Parts Transactions: {}", view.source.display());
    if let Some(ref report) = view.report {
        let _ = writeln!(
            out,
            "Read at {} ({} record(s))",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.records.len()
        );
    }

    if let Some(ref error) = view.error {
        let _ = writeln!(out, "\n[!] {error}");
    }

    let summaries = view.visible_summaries();

    out.push('\n');
    out.push_str(&render_table(&summaries));

    let groups = group_by_part_name(&summaries);
    if !groups.is_empty() {
        let _ = writeln!(out, "\nCheck-In vs Check-Out by Part");
        let width = groups.iter().map(|g| g.part_name.chars().count()).max().unwrap_or(0);
        for group in &groups {
            let _ = writeln!(
                out,
                "  {:<width$}  in {:>4}  out {:>4}  ({} unit(s))",
                group.part_name, group.check_ins, group.check_outs, group.units
            );
        }
    }

    out.push('\n');
    out.push_str(&render_distribution(&view.visible_totals()));

    let warnings = view.warnings();
    if !warnings.is_empty() {
        let _ = writeln!(out, "\nSkipped lines (partial result):");
        for warning in warnings {
            let _ = writeln!(out, "  - {warning}");
        }
    }

    out
}

/// Render summary rows as an aligned text table.
pub fn render_table(summaries: &[PartSummary]) -> String {
    if summaries.is_empty() {
        return "(no part records)\n".to_string();
    }

    let rows: Vec<[String; 7]> = summaries
        .iter()
        .map(|s| {
            [
                s.unique_hash.clone(),
                s.part_id.clone(),
                s.part_name.clone(),
                s.supplier.clone(),
                s.quantity.clone(),
                s.check_ins.to_string(),
                s.check_outs.to_string(),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &TABLE_HEADERS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

/// Render the two-category distribution of the totals.
pub fn render_distribution(totals: &TransactionTotals) -> String {
    let mut out = String::from("Overall Check-In vs Check-Out Distribution\n");
    for slice in totals.distribution() {
        let _ = writeln!(
            out,
            "  {:<10}  {:>6}  {:>5.1}%",
            slice.label,
            slice.count,
            slice.fraction * 100.0
        );
    }
    out
}

/// Append one row; the last two (numeric) columns are right-aligned.
fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let numeric_from = widths.len().saturating_sub(2);
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(col, (cell, &width))| {
            if col >= numeric_from {
                format!("{:>width$}", cell.as_ref())
            } else {
                format!("{:<width$}", cell.as_ref())
            }
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
