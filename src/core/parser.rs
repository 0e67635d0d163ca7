// PartLedger - core/parser.rs
//
// Single-pass parser for the parts ledger format.
// Core layer: accepts file content as a string, never touches the filesystem.
//
// Format:
//   <unique_hash>, <part_id>, <part_name>, <quantity>, <supplier>
//   \t<timestamp> : <event_kind> : <operator>
//
// A line that does not start with a tab opens a new part record; a
// tab-prefixed line is an event of the most recently opened record.
// Blank lines are skipped and do not close the current record.

use crate::core::model::{PartEvent, PartRecord};
use crate::util::constants;
use crate::util::error::ParseError;

/// How line-level errors are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Abort on the first malformed or orphan line.
    #[default]
    Strict,

    /// Skip the offending line, record the error, and continue.
    Lenient,
}

impl ParseMode {
    pub fn label(&self) -> &'static str {
        match self {
            ParseMode::Strict => "strict",
            ParseMode::Lenient => "lenient",
        }
    }
}

/// Configuration for parsing operations.
#[derive(Debug, Clone)]
pub struct ParseConfig {
    pub mode: ParseMode,
    /// Errors stored in lenient mode before further ones are only counted.
    pub max_parse_errors: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            mode: ParseMode::default(),
            max_parse_errors: constants::MAX_PARSE_ERRORS,
        }
    }
}

/// Result of parsing one ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    /// Part records in header order.
    pub records: Vec<PartRecord>,
    /// Skipped lines (lenient mode only; capped at `max_parse_errors`).
    pub errors: Vec<ParseError>,
    /// Errors beyond the cap that were counted but not stored.
    pub suppressed_errors: usize,
    /// Total lines processed, blank lines included.
    pub lines_processed: u64,
}

impl ParseResult {
    /// Total number of skipped lines, stored or suppressed.
    pub fn error_count(&self) -> usize {
        self.errors.len() + self.suppressed_errors
    }
}

/// Parse ledger content in strict mode.
///
/// Returns the records in header order, or the first line error.
pub fn parse(content: &str) -> Result<Vec<PartRecord>, ParseError> {
    parse_content(content, &ParseConfig::default()).map(|result| result.records)
}

/// Parse ledger content with the given configuration.
///
/// In `Strict` mode the first line error is returned as `Err`. In `Lenient`
/// mode this never fails: bad lines are skipped and reported in
/// `ParseResult::errors`. A malformed header in lenient mode closes the
/// current record, so the event lines under it surface as orphans instead of
/// being credited to the previous part.
pub fn parse_content(content: &str, config: &ParseConfig) -> Result<ParseResult, ParseError> {
    let mut ledger = Ledger::default();
    let mut errors = Vec::new();
    let mut suppressed_errors = 0usize;
    let mut lines_processed: u64 = 0;

    for (line_idx, line) in content.lines().enumerate() {
        lines_processed += 1;
        let line_number = (line_idx as u64) + 1;

        let outcome = classify_line(line, line_number).and_then(|kind| ledger.apply(kind));

        if let Err(err) = outcome {
            match config.mode {
                ParseMode::Strict => {
                    tracing::debug!(line = line_number, error = %err, "Strict parse aborted");
                    return Err(err);
                }
                ParseMode::Lenient => {
                    tracing::warn!(line = line_number, error = %err, "Skipping ledger line");
                    if matches!(err, ParseError::MalformedHeader { .. }) {
                        ledger.close_current();
                    }
                    if errors.len() < config.max_parse_errors {
                        errors.push(err);
                    } else {
                        suppressed_errors += 1;
                    }
                }
            }
        }
    }

    if suppressed_errors > 0 {
        tracing::warn!(
            stored = errors.len(),
            suppressed = suppressed_errors,
            "Parse error cap reached; further errors were counted only"
        );
    }

    tracing::debug!(
        records = ledger.records.len(),
        lines = lines_processed,
        errors = errors.len() + suppressed_errors,
        mode = config.mode.label(),
        "Ledger parsed"
    );

    Ok(ParseResult {
        records: ledger.records,
        errors,
        suppressed_errors,
        lines_processed,
    })
}

// =============================================================================
// Line classification
// =============================================================================

/// A validated ledger line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineKind {
    Blank,
    Header(PartRecord),
    Event(PartEvent),
}

/// Classify one raw line, validating its field count.
fn classify_line(line: &str, line_number: u64) -> Result<LineKind, ParseError> {
    if line.trim().is_empty() {
        return Ok(LineKind::Blank);
    }

    if line.starts_with(constants::EVENT_LINE_PREFIX) {
        parse_event_line(line, line_number).map(LineKind::Event)
    } else {
        parse_header_line(line, line_number).map(LineKind::Header)
    }
}

fn parse_header_line(line: &str, line_number: u64) -> Result<PartRecord, ParseError> {
    let fields: Vec<&str> = line
        .split(constants::HEADER_FIELD_SEPARATOR)
        .map(str::trim)
        .collect();

    let [unique_hash, part_id, part_name, quantity, supplier] = fields[..] else {
        return Err(ParseError::MalformedHeader {
            line_number,
            field_count: fields.len(),
            line: preview(line),
        });
    };

    let record = PartRecord {
        unique_hash: unique_hash.to_string(),
        part_id: part_id.to_string(),
        part_name: part_name.to_string(),
        quantity: quantity.to_string(),
        supplier: supplier.to_string(),
        events: Vec::new(),
        line_number,
    };

    if record.quantity_value().is_none() {
        tracing::debug!(
            line = line_number,
            quantity = %record.quantity,
            "Quantity is not a plain integer; kept verbatim"
        );
    }

    Ok(record)
}

fn parse_event_line(line: &str, line_number: u64) -> Result<PartEvent, ParseError> {
    let fields: Vec<&str> = line
        .trim()
        .split(constants::EVENT_FIELD_SEPARATOR)
        .map(str::trim)
        .collect();

    let [timestamp, event_kind, operator] = fields[..] else {
        return Err(ParseError::MalformedEvent {
            line_number,
            field_count: fields.len(),
            line: preview(line),
        });
    };

    Ok(PartEvent {
        timestamp: timestamp.to_string(),
        event_kind: event_kind.to_string(),
        operator: operator.to_string(),
        line_number,
    })
}

/// Trimmed line text, capped at `DEBUG_MAX_LINE_PREVIEW` characters.
fn preview(line: &str) -> String {
    let trimmed = line.trim();
    match trimmed.char_indices().nth(constants::DEBUG_MAX_LINE_PREVIEW) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

// =============================================================================
// Accumulator
// =============================================================================

/// Records built so far plus the index of the record that receives events.
#[derive(Debug, Default)]
struct Ledger {
    records: Vec<PartRecord>,
    current: Option<usize>,
}

impl Ledger {
    fn apply(&mut self, kind: LineKind) -> Result<(), ParseError> {
        match kind {
            LineKind::Blank => Ok(()),
            LineKind::Header(record) => {
                self.records.push(record);
                self.current = Some(self.records.len() - 1);
                Ok(())
            }
            LineKind::Event(event) => match self.current {
                Some(idx) => {
                    self.records[idx].events.push(event);
                    Ok(())
                }
                None => Err(ParseError::OrphanEvent {
                    line_number: event.line_number,
                    line: format!(
                        "{}{}{}{}{}",
                        event.timestamp,
                        constants::EVENT_FIELD_SEPARATOR,
                        event.event_kind,
                        constants::EVENT_FIELD_SEPARATOR,
                        event.operator
                    ),
                }),
            },
        }
    }

    fn close_current(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = "H1, P1, Widget, 10, Acme\n\
                            \t2025-04-05 08:00 : IN : Alice\n\
                            \t2025-04-05 09:00 : OUT : Bob\n\
                            \n\
                            H2, P2, Gadget, 5, Beta\n\
                            \t2025-04-05 10:00 : IN : Carol\n";

    fn lenient() -> ParseConfig {
        ParseConfig {
            mode: ParseMode::Lenient,
            ..ParseConfig::default()
        }
    }

    #[test]
    fn test_parse_scenario() {
        let records = parse(SCENARIO).unwrap();
        assert_eq!(records.len(), 2);

        let widget = &records[0];
        assert_eq!(widget.unique_hash, "H1");
        assert_eq!(widget.part_id, "P1");
        assert_eq!(widget.part_name, "Widget");
        assert_eq!(widget.quantity, "10");
        assert_eq!(widget.supplier, "Acme");
        assert_eq!(widget.line_number, 1);
        assert_eq!(widget.events.len(), 2);
        assert_eq!(widget.events[0].timestamp, "2025-04-05 08:00");
        assert_eq!(widget.events[0].event_kind, "IN");
        assert_eq!(widget.events[0].operator, "Alice");
        assert_eq!(widget.events[1].operator, "Bob");

        let gadget = &records[1];
        assert_eq!(gadget.part_name, "Gadget");
        assert_eq!(gadget.line_number, 5);
        assert_eq!(gadget.events.len(), 1);
        assert_eq!(gadget.events[0].line_number, 6);
    }

    #[test]
    fn test_parse_empty_content() {
        let result = parse_content("", &ParseConfig::default()).unwrap();
        assert!(result.records.is_empty());
        assert!(result.errors.is_empty());
        assert_eq!(result.lines_processed, 0);
    }

    #[test]
    fn test_header_without_events() {
        let records = parse("H1, P1, Widget, 10, Acme\n").unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].events.is_empty());
    }

    #[test]
    fn test_blank_lines_do_not_change_result() {
        let spaced = "\n\nH1, P1, Widget, 10, Acme\n\
                      \n   \n\
                      \t2025-04-05 08:00 : IN : Alice\n\
                      \t\n\
                      \t2025-04-05 09:00 : OUT : Bob\n\
                      \n\n\
                      H2, P2, Gadget, 5, Beta\n\
                      \n\
                      \t2025-04-05 10:00 : IN : Carol\n\n";

        let strip_lines = |records: Vec<PartRecord>| -> Vec<PartRecord> {
            records
                .into_iter()
                .map(|mut r| {
                    r.line_number = 0;
                    for e in &mut r.events {
                        e.line_number = 0;
                    }
                    r
                })
                .collect()
        };

        assert_eq!(
            strip_lines(parse(spaced).unwrap()),
            strip_lines(parse(SCENARIO).unwrap())
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        let records = parse("H1, P1, Widget, 10, Acme\r\n\t2025-04-05 08:00 : IN : Alice\r\n")
            .unwrap();
        assert_eq!(records[0].supplier, "Acme");
        assert_eq!(records[0].events[0].operator, "Alice");
    }

    #[test]
    fn test_parse_is_idempotent() {
        assert_eq!(parse(SCENARIO).unwrap(), parse(SCENARIO).unwrap());
    }

    #[test]
    fn test_event_kind_accepted_verbatim() {
        let records = parse("H1, P1, Widget, 10, Acme\n\t08:00 : AUDIT : Dana\n").unwrap();
        assert_eq!(records[0].events[0].event_kind, "AUDIT");
    }

    #[test]
    fn test_non_numeric_quantity_is_kept() {
        let records = parse("H1, P1, Widget, a dozen, Acme\n").unwrap();
        assert_eq!(records[0].quantity, "a dozen");
        assert_eq!(records[0].quantity_value(), None);
    }

    #[test]
    fn test_space_indented_line_is_a_header() {
        let err = parse("H1, P1, Widget, 10, Acme\n    08:00 : IN : Alice\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::MalformedHeader {
                line_number: 2,
                field_count: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_strict_malformed_header() {
        let err = parse("H1, P1, Widget, 10\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedHeader {
                line_number: 1,
                field_count: 4,
                line: "H1, P1, Widget, 10".to_string(),
            }
        );
    }

    #[test]
    fn test_strict_header_with_extra_comma() {
        let err = parse("H1, P1, Widget, Large, 10, Acme\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::MalformedHeader { field_count: 6, .. }
        ));
    }

    #[test]
    fn test_strict_malformed_event() {
        let err = parse("H1, P1, Widget, 10, Acme\n\t08:00 : IN\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::MalformedEvent {
                line_number: 2,
                field_count: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_strict_orphan_event() {
        let err = parse("\t08:00 : IN : Alice\nH1, P1, Widget, 10, Acme\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::OrphanEvent {
                line_number: 1,
                line: "08:00 : IN : Alice".to_string(),
            }
        );
    }

    #[test]
    fn test_lenient_skips_bad_lines() {
        let content = "\t07:00 : IN : Early\n\
                       H1, P1, Widget, 10, Acme\n\
                       \t08:00 : IN : Alice\n\
                       \t08:30 : OUT\n\
                       \t09:00 : OUT : Bob\n";

        let result = parse_content(content, &lenient()).unwrap();
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].events.len(), 2);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0].line_number(), 1);
        assert_eq!(result.errors[1].line_number(), 4);
        assert_eq!(result.lines_processed, 5);
    }

    #[test]
    fn test_lenient_malformed_header_orphans_its_events() {
        let content = "H1, P1, Widget, 10, Acme\n\
                       \t08:00 : IN : Alice\n\
                       H2, P2, Gadget\n\
                       \t09:00 : IN : Bob\n\
                       H3, P3, Sprocket, 1, Gamma\n\
                       \t10:00 : OUT : Carol\n";

        let result = parse_content(content, &lenient()).unwrap();
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].events.len(), 1, "Bob's event must not attach to H1");
        assert_eq!(result.records[1].unique_hash, "H3");
        assert_eq!(result.records[1].events.len(), 1);

        assert!(matches!(result.errors[0], ParseError::MalformedHeader { line_number: 3, .. }));
        assert!(matches!(result.errors[1], ParseError::OrphanEvent { line_number: 4, .. }));
    }

    #[test]
    fn test_lenient_error_cap() {
        let content = "\ta : IN : x\n".repeat(5);
        let config = ParseConfig {
            mode: ParseMode::Lenient,
            max_parse_errors: 2,
        };
        let result = parse_content(&content, &config).unwrap();
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.suppressed_errors, 3);
        assert_eq!(result.error_count(), 5);
    }

    #[test]
    fn test_long_line_preview_is_truncated() {
        let long = format!("H1, {}", "x".repeat(1_000));
        let err = parse(&long).unwrap_err();
        let ParseError::MalformedHeader { line, .. } = err else {
            panic!("expected MalformedHeader, got {err:?}");
        };
        assert!(line.ends_with("..."));
        assert_eq!(line.chars().count(), constants::DEBUG_MAX_LINE_PREVIEW + 3);
    }
}
