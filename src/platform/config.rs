// PartLedger - platform/config.rs
//
// Platform-specific directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for PartLedger configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/partledger/ or %APPDATA%\PartLedger\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// Report format
// =============================================================================

/// How the CLI emits a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Human-readable summary table with totals.
    #[default]
    Table,
    Csv,
    Json,
}

impl ReportFormat {
    /// Parse a format name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "table" => Some(Self::Table),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[ledger]` section.
    pub ledger: LedgerSection,
    /// `[export]` section.
    pub export: ExportSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[ledger]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LedgerSection {
    /// Ledger file path.
    pub path: Option<String>,
    /// Parse mode: "strict" or "lenient".
    pub mode: Option<String>,
    /// Stored-error cap in lenient mode.
    pub max_parse_errors: Option<usize>,
    /// Largest ledger file accepted, in bytes.
    pub max_file_size_bytes: Option<u64>,
}

/// `[export]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Output format: "table", "csv", or "json".
    pub format: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Ledger file to read.
    pub ledger_path: PathBuf,
    /// Skip malformed lines instead of failing.
    pub lenient: bool,
    /// Stored-error cap in lenient mode.
    pub max_parse_errors: usize,
    /// Largest ledger file accepted, in bytes.
    pub max_file_size: u64,
    /// Default output format.
    pub format: ReportFormat,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from(constants::DEFAULT_LEDGER_FILE),
            lenient: false,
            max_parse_errors: constants::MAX_PARSE_ERRORS,
            max_file_size: constants::DEFAULT_MAX_FILE_SIZE,
            format: ReportFormat::default(),
            log_level: None,
        }
    }
}

/// Load and validate the config file at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first run).
/// If the file is unreadable or unparseable, returns defaults with a warning.
///
/// Runs before logging is initialised, so problems are returned rather
/// than logged.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    if !config_path.exists() {
        return (AppConfig::default(), Vec::new());
    }

    match read_raw_config(config_path) {
        Ok(raw) => validate(raw),
        Err(e) => (
            AppConfig::default(),
            vec![format!("{e}. Using defaults.")],
        ),
    }
}

fn read_raw_config(config_path: &Path) -> Result<RawConfig, ConfigError> {
    let content = std::fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
        path: config_path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: config_path.to_path_buf(),
        source: e,
    })
}

/// Validate each field, accumulating a warning for every rejected value.
fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- Ledger: path --
    if let Some(path) = raw.ledger.path {
        if path.trim().is_empty() {
            warnings.push(format!(
                "[ledger] path is empty. Using default ({}).",
                constants::DEFAULT_LEDGER_FILE
            ));
        } else {
            config.ledger_path = PathBuf::from(path);
        }
    }

    // -- Ledger: mode --
    if let Some(ref mode) = raw.ledger.mode {
        match mode.to_lowercase().as_str() {
            "strict" => config.lenient = false,
            "lenient" => config.lenient = true,
            other => warnings.push(format!(
                "[ledger] mode = \"{other}\" is not recognised. \
                 Expected \"strict\" or \"lenient\". Using default (strict)."
            )),
        }
    }

    // -- Ledger: max_parse_errors --
    if let Some(max) = raw.ledger.max_parse_errors {
        if (constants::MIN_MAX_PARSE_ERRORS..=constants::ABSOLUTE_MAX_PARSE_ERRORS).contains(&max)
        {
            config.max_parse_errors = max;
        } else {
            warnings.push(
                ConfigError::ValueOutOfRange {
                    field: "[ledger] max_parse_errors".to_string(),
                    value: max.to_string(),
                    expected: format!(
                        "{}-{} (default {})",
                        constants::MIN_MAX_PARSE_ERRORS,
                        constants::ABSOLUTE_MAX_PARSE_ERRORS,
                        constants::MAX_PARSE_ERRORS
                    ),
                }
                .to_string(),
            );
        }
    }

    // -- Ledger: max_file_size_bytes --
    if let Some(size) = raw.ledger.max_file_size_bytes {
        if (1..=constants::ABSOLUTE_MAX_FILE_SIZE).contains(&size) {
            config.max_file_size = size;
        } else {
            warnings.push(
                ConfigError::ValueOutOfRange {
                    field: "[ledger] max_file_size_bytes".to_string(),
                    value: size.to_string(),
                    expected: format!(
                        "1-{} (default {})",
                        constants::ABSOLUTE_MAX_FILE_SIZE,
                        constants::DEFAULT_MAX_FILE_SIZE
                    ),
                }
                .to_string(),
            );
        }
    }

    // -- Export: format --
    if let Some(ref format) = raw.export.format {
        match ReportFormat::from_name(format) {
            Some(f) => config.format = f,
            None => warnings.push(format!(
                "[export] format = \"{format}\" is not recognised. \
                 Valid values: table, csv, json. Using default (table)."
            )),
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info)."
            ));
        }
    }

    (config, warnings)
}
