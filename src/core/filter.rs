// PartLedger - core/filter.rs
//
// Record filter for the transaction view.
// All active criteria are AND-combined.
// Core layer: pure logic, no I/O.

use crate::core::model::PartRecord;
use crate::util::error::FilterError;
use regex::Regex;

/// Filter criteria. Empty / `None` fields do not constrain.
#[derive(Debug, Clone, Default)]
pub struct PartFilter {
    /// Exact supplier match (case-insensitive).
    pub supplier: Option<String>,

    /// Exact part ID match (case-insensitive).
    pub part_id: Option<String>,

    /// Case-insensitive substring searched in hash, ID, name, and supplier.
    pub text_search: String,

    /// Compiled regex matched against hash, ID, name, and supplier.
    pub regex_search: Option<Regex>,
}

impl PartFilter {
    /// Returns true if no criteria are active.
    pub fn is_empty(&self) -> bool {
        self.supplier.is_none()
            && self.part_id.is_none()
            && self.text_search.is_empty()
            && self.regex_search.is_none()
    }

    /// Set the regex search pattern, compiling it.
    /// An empty pattern clears the regex criterion.
    pub fn set_regex(&mut self, pattern: &str) -> Result<(), FilterError> {
        if pattern.is_empty() {
            self.regex_search = None;
            return Ok(());
        }
        let regex = Regex::new(pattern).map_err(|e| FilterError::InvalidRegex {
            pattern: pattern.to_string(),
            source: e,
        })?;
        self.regex_search = Some(regex);
        Ok(())
    }

    /// Whether a single record passes every active criterion.
    pub fn matches(&self, record: &PartRecord) -> bool {
        if let Some(ref supplier) = self.supplier {
            if !record.supplier.eq_ignore_ascii_case(supplier) {
                return false;
            }
        }

        if let Some(ref part_id) = self.part_id {
            if !record.part_id.eq_ignore_ascii_case(part_id) {
                return false;
            }
        }

        let fields = [
            record.unique_hash.as_str(),
            record.part_id.as_str(),
            record.part_name.as_str(),
            record.supplier.as_str(),
        ];

        if !self.text_search.is_empty() {
            let needle = self.text_search.to_lowercase();
            if !fields.iter().any(|f| f.to_lowercase().contains(&needle)) {
                return false;
            }
        }

        if let Some(ref regex) = self.regex_search {
            if !fields.iter().any(|f| regex.is_match(f)) {
                return false;
            }
        }

        true
    }
}

/// Indices of the records that pass the filter, in record order.
pub fn apply_filter(records: &[PartRecord], filter: &PartFilter) -> Vec<usize> {
    if filter.is_empty() {
        return (0..records.len()).collect();
    }

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| filter.matches(record))
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hash: &str, part_id: &str, name: &str, supplier: &str) -> PartRecord {
        PartRecord {
            unique_hash: hash.to_string(),
            part_id: part_id.to_string(),
            part_name: name.to_string(),
            quantity: "1".to_string(),
            supplier: supplier.to_string(),
            events: Vec::new(),
            line_number: 1,
        }
    }

    fn sample() -> Vec<PartRecord> {
        vec![
            record("a1f3", "P-100", "Hydraulic Pump", "Acme"),
            record("b2c4", "P-200", "Servo Motor", "Beta Industrial"),
            record("c9d0", "P-100", "Hydraulic Pump", "Beta Industrial"),
        ]
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let filter = PartFilter::default();
        assert!(filter.is_empty());
        assert_eq!(apply_filter(&sample(), &filter), vec![0, 1, 2]);
    }

    #[test]
    fn test_supplier_filter_is_case_insensitive() {
        let filter = PartFilter {
            supplier: Some("beta industrial".to_string()),
            ..Default::default()
        };
        assert_eq!(apply_filter(&sample(), &filter), vec![1, 2]);
    }

    #[test]
    fn test_criteria_are_and_combined() {
        let filter = PartFilter {
            supplier: Some("Beta Industrial".to_string()),
            part_id: Some("P-100".to_string()),
            ..Default::default()
        };
        assert_eq!(apply_filter(&sample(), &filter), vec![2]);
    }

    #[test]
    fn test_text_search_covers_name_and_hash() {
        let by_name = PartFilter {
            text_search: "servo".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filter(&sample(), &by_name), vec![1]);

        let by_hash = PartFilter {
            text_search: "C9D0".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filter(&sample(), &by_hash), vec![2]);
    }

    #[test]
    fn test_regex_filter() {
        let mut filter = PartFilter::default();
        filter.set_regex(r"^[ab]\d").unwrap();
        assert_eq!(apply_filter(&sample(), &filter), vec![0, 1]);

        filter.set_regex("").unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_invalid_regex_is_rejected() {
        let mut filter = PartFilter::default();
        let err = filter.set_regex("(unclosed").unwrap_err();
        assert!(matches!(err, FilterError::InvalidRegex { .. }));
        assert!(filter.regex_search.is_none());
    }
}
