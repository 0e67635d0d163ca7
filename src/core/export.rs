// PartLedger - core/export.rs
//
// CSV and JSON export of transaction summaries.
// Core layer: writes to any Write trait object.

use crate::core::model::{
    DistributionSlice, PartNameGroup, PartRecord, PartSummary, TransactionReport,
    TransactionTotals,
};
use crate::core::summary::group_by_part_name;
use crate::util::error::ExportError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Export summary rows to CSV format.
///
/// Writes: unique_hash, part_id, part_name, supplier, quantity, check_ins, check_outs
///
/// `export_path` is used only for error context. Returns the row count.
pub fn export_csv<W: Write>(
    summaries: &[PartSummary],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let csv_err = |e: csv::Error| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    csv_writer
        .write_record([
            "unique_hash",
            "part_id",
            "part_name",
            "supplier",
            "quantity",
            "check_ins",
            "check_outs",
        ])
        .map_err(csv_err)?;

    let mut count = 0;
    for summary in summaries {
        let check_ins = summary.check_ins.to_string();
        let check_outs = summary.check_outs.to_string();
        csv_writer
            .write_record([
                summary.unique_hash.as_str(),
                summary.part_id.as_str(),
                summary.part_name.as_str(),
                summary.supplier.as_str(),
                summary.quantity.as_str(),
                check_ins.as_str(),
                check_outs.as_str(),
            ])
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(rows = count, path = %export_path.display(), "CSV export written");
    Ok(count)
}

/// JSON document shape: the report plus its derived chart series.
#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a PathBuf,
    generated_at: DateTime<Utc>,
    totals: TransactionTotals,
    distribution: [DistributionSlice; 2],
    part_groups: Vec<PartNameGroup>,
    summaries: &'a [PartSummary],
    records: &'a [PartRecord],
    warnings: &'a [String],
    skipped_lines: usize,
}

/// Export a full report to pretty-printed JSON.
///
/// Returns the number of part records written.
pub fn export_json<W: Write>(
    report: &TransactionReport,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let doc = JsonReport {
        source: &report.source,
        generated_at: report.generated_at,
        totals: report.totals,
        distribution: report.totals.distribution(),
        part_groups: group_by_part_name(&report.summaries),
        summaries: &report.summaries,
        records: &report.records,
        warnings: &report.warnings,
        skipped_lines: report.skipped_lines,
    };

    serde_json::to_writer_pretty(writer, &doc).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(report.records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse;
    use crate::core::summary::{aggregate_totals, summarize};

    fn make_report() -> TransactionReport {
        let records = parse(
            "H1, P1, Widget, 10, Acme\n\
             \t2025-04-05 08:00 : IN : Alice\n\
             \t2025-04-05 09:00 : OUT : Bob\n\
             H2, P2, \"Gadget\", 5, Beta\n\
             \t2025-04-05 10:00 : IN : Carol\n",
        )
        .unwrap();
        let summaries = summarize(&records);
        let totals = aggregate_totals(&summaries);
        TransactionReport {
            source: PathBuf::from("parts.log"),
            generated_at: Utc::now(),
            records,
            summaries,
            totals,
            warnings: Vec::new(),
            skipped_lines: 0,
        }
    }

    #[test]
    fn test_csv_export() {
        let report = make_report();
        let mut buf = Vec::new();
        let count = export_csv(&report.summaries, &mut buf, Path::new("out.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        let mut lines = output.lines();
        assert_eq!(
            lines.next(),
            Some("unique_hash,part_id,part_name,supplier,quantity,check_ins,check_outs")
        );
        assert_eq!(lines.next(), Some("H1,P1,Widget,Acme,10,1,1"));
        // Embedded quotes are escaped by the csv writer.
        assert_eq!(lines.next(), Some("H2,P2,\"\"\"Gadget\"\"\",Beta,5,1,0"));
    }

    #[test]
    fn test_json_export() {
        let report = make_report();
        let mut buf = Vec::new();
        let count = export_json(&report, &mut buf, Path::new("out.json")).unwrap();
        assert_eq!(count, 2);

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["totals"]["check_ins"], 2);
        assert_eq!(value["totals"]["check_outs"], 1);
        assert_eq!(value["distribution"][0]["label"], "Check-Ins");
        assert_eq!(value["records"][0]["events"][1]["operator"], "Bob");
        assert_eq!(value["part_groups"].as_array().map(Vec::len), Some(2));
    }
}
