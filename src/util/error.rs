// PartLedger - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all PartLedger operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LedgerError {
    /// The ledger file is missing, unreadable, or permission-denied.
    FileAccess { path: PathBuf, source: io::Error },

    /// The ledger file exceeds the configured size limit.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// The ledger file was read but its content is malformed (strict mode).
    Parse { path: PathBuf, source: ParseError },

    /// Filter construction failed.
    Filter(FilterError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileAccess { path, source } => {
                write!(f, "Cannot read ledger '{}': {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Ledger '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::Parse { path, source } => {
                write!(f, "Malformed ledger '{}': {source}", path.display())
            }
            Self::Filter(e) => write!(f, "Filter error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for LedgerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileAccess { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Filter(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::FileTooLarge { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// Line-level errors produced by the ledger parser.
///
/// Line numbers are 1-based. `line` holds a preview of the offending text,
/// capped at `DEBUG_MAX_LINE_PREVIEW` characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A header line did not split into exactly five comma-separated fields.
    MalformedHeader {
        line_number: u64,
        field_count: usize,
        line: String,
    },

    /// An event line did not split into exactly three `" : "`-separated fields.
    MalformedEvent {
        line_number: u64,
        field_count: usize,
        line: String,
    },

    /// An event line appeared with no part record to attach it to.
    OrphanEvent { line_number: u64, line: String },
}

impl ParseError {
    /// The 1-based line number the error refers to.
    pub fn line_number(&self) -> u64 {
        match self {
            Self::MalformedHeader { line_number, .. }
            | Self::MalformedEvent { line_number, .. }
            | Self::OrphanEvent { line_number, .. } => *line_number,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedHeader {
                line_number,
                field_count,
                line,
            } => write!(
                f,
                "line {line_number}: header has {field_count} field(s), expected {} \
                 (unique_hash, part_id, part_name, quantity, supplier): '{line}'",
                super::constants::HEADER_FIELD_COUNT
            ),
            Self::MalformedEvent {
                line_number,
                field_count,
                line,
            } => write!(
                f,
                "line {line_number}: event has {field_count} field(s), expected {} \
                 (timestamp : event_kind : operator): '{line}'",
                super::constants::EVENT_FIELD_COUNT
            ),
            Self::OrphanEvent { line_number, line } => write!(
                f,
                "line {line_number}: event line has no preceding part header: '{line}'"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

// ---------------------------------------------------------------------------
// Filter errors
// ---------------------------------------------------------------------------

/// Errors related to filter construction.
#[derive(Debug)]
pub enum FilterError {
    /// User-provided regex is invalid.
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegex { pattern, source } => {
                write!(f, "Invalid filter regex '{pattern}': {source}")
            }
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRegex { source, .. } => Some(source),
        }
    }
}

impl From<FilterError> for LedgerError {
    fn from(e: FilterError) -> Self {
        Self::Filter(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for LedgerError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for LedgerError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for PartLedger results.
pub type Result<T> = std::result::Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_parse_error_display_includes_line_number() {
        let err = ParseError::MalformedHeader {
            line_number: 7,
            field_count: 3,
            line: "H1, P1, Widget".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("line 7:"), "got: {msg}");
        assert!(msg.contains("3 field(s), expected 5"));
        assert_eq!(err.line_number(), 7);
    }

    #[test]
    fn test_ledger_error_preserves_source_chain() {
        let err = LedgerError::Parse {
            path: PathBuf::from("parts.log"),
            source: ParseError::OrphanEvent {
                line_number: 1,
                line: "2025-04-05 : IN : Alice".to_string(),
            },
        };
        let source = err.source().expect("parse error should chain");
        assert!(source.to_string().contains("no preceding part header"));
    }

    #[test]
    fn test_file_access_error_display() {
        let err = LedgerError::FileAccess {
            path: PathBuf::from("missing.log"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("missing.log"));
        assert!(err.source().is_some());
    }
}
