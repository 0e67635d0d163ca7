// PartLedger - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "PartLedger";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "PartLedger";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Ledger file
// =============================================================================

/// Log file read when no path is given on the CLI or in config.toml.
pub const DEFAULT_LEDGER_FILE: &str = "parts.log";

/// Default upper bound on the ledger file size. The whole file is read into
/// memory before parsing, so this bounds the allocation.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 64 * 1024 * 1024; // 64 MB

/// Hard upper bound on the configurable ledger file size.
pub const ABSOLUTE_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024; // 1 GB

// =============================================================================
// Line format
// =============================================================================

/// Prefix that marks an event line.
pub const EVENT_LINE_PREFIX: char = '\t';

/// Field separator on header lines.
pub const HEADER_FIELD_SEPARATOR: char = ',';

/// Field separator on event lines.
pub const EVENT_FIELD_SEPARATOR: &str = " : ";

/// Number of fields on a header line.
pub const HEADER_FIELD_COUNT: usize = 5;

/// Number of fields on an event line.
pub const EVENT_FIELD_COUNT: usize = 3;

/// Event kind recorded for a check-in.
pub const EVENT_KIND_IN: &str = "IN";

/// Event kind recorded for a check-out.
pub const EVENT_KIND_OUT: &str = "OUT";

// =============================================================================
// Parsing limits
// =============================================================================

/// Maximum number of line errors kept in lenient mode. Further errors are
/// counted but not stored.
pub const MAX_PARSE_ERRORS: usize = 1_000;

/// Minimum user-configurable error cap.
pub const MIN_MAX_PARSE_ERRORS: usize = 1;

/// Hard upper bound on the configurable error cap.
pub const ABSOLUTE_MAX_PARSE_ERRORS: usize = 10_000;

// =============================================================================
// Report labels
// =============================================================================

/// Distribution label for check-ins.
pub const LABEL_CHECK_INS: &str = "Check-Ins";

/// Distribution label for check-outs.
pub const LABEL_CHECK_OUTS: &str = "Check-Outs";

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum length of a log line included in errors and debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
