// PartLedger - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading (CLI flags override config values)
// 3. Logging initialisation (debug mode support)
// 4. Loading the ledger and emitting it as a table, CSV, or JSON

use clap::Parser;
use partledger::app::render::render_view;
use partledger::app::report::{load_report, LoadOptions};
use partledger::app::state::TransactionView;
use partledger::core::export::{export_csv, export_json};
use partledger::core::filter::PartFilter;
use partledger::core::parser::{ParseConfig, ParseMode};
use partledger::platform::config::{load_config, AppConfig, PlatformPaths, ReportFormat};
use partledger::util;
use partledger::util::error::{ConfigError, ExportError, LedgerError};
use std::io::Write;
use std::path::{Path, PathBuf};

/// PartLedger - parts check-in/check-out ledger summariser.
///
/// Reads a parts ledger (header lines followed by tab-indented
/// `timestamp : IN|OUT : operator` lines) and reports per-part and overall
/// check-in/check-out counts.
#[derive(Parser, Debug)]
#[command(name = "partledger", version, about)]
struct Cli {
    /// Ledger file to read (default: [ledger] path in config, else parts.log).
    path: Option<PathBuf>,

    /// Configuration file (default: platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Output format: table, csv, or json.
    #[arg(short = 'f', long = "format")]
    format: Option<String>,

    /// Skip malformed lines instead of failing.
    #[arg(short = 'l', long = "lenient")]
    lenient: bool,

    /// Only parts from this supplier (case-insensitive).
    #[arg(long = "supplier")]
    supplier: Option<String>,

    /// Only parts with this part ID (case-insensitive).
    #[arg(long = "part-id")]
    part_id: Option<String>,

    /// Case-insensitive text search over hash, ID, name, and supplier.
    #[arg(short = 's', long = "search")]
    search: Option<String>,

    /// Regex search over hash, ID, name, and supplier.
    #[arg(short = 'r', long = "regex")]
    regex: Option<String>,

    /// Write output to this file instead of stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => {}
        // The rendered table already carries the error indicator.
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::error!(error = %e, "PartLedger failed");
            eprintln!("Error: {e}");
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = std::error::Error::source(cause);
            }
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the table was rendered for a ledger that
/// could not be loaded.
fn run(cli: &Cli) -> util::error::Result<bool> {
    let (config, config_warnings) = load_cli_config(cli)?;

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "PartLedger starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config validation warning");
    }

    let format = match cli.format {
        Some(ref name) => ReportFormat::from_name(name).ok_or_else(|| {
            LedgerError::Config(ConfigError::ValueOutOfRange {
                field: "--format".to_string(),
                value: name.clone(),
                expected: "table, csv, or json".to_string(),
            })
        })?,
        None => config.format,
    };

    let mut filter = PartFilter {
        supplier: cli.supplier.clone(),
        part_id: cli.part_id.clone(),
        text_search: cli.search.clone().unwrap_or_default(),
        regex_search: None,
    };
    if let Some(ref pattern) = cli.regex {
        filter.set_regex(pattern)?;
    }

    let options = LoadOptions {
        parse: ParseConfig {
            mode: if cli.lenient || config.lenient {
                ParseMode::Lenient
            } else {
                ParseMode::Strict
            },
            max_parse_errors: config.max_parse_errors,
        },
        max_file_size: config.max_file_size,
    };

    let ledger_path = cli.path.clone().unwrap_or(config.ledger_path);
    tracing::debug!(
        path = %ledger_path.display(),
        mode = options.parse.mode.label(),
        "Loading ledger"
    );

    match format {
        ReportFormat::Table => {
            let mut view = TransactionView::load(&ledger_path, &options);
            view.set_filter(filter);
            write_output(cli.output.as_deref(), render_view(&view).as_bytes())?;
            Ok(view.error.is_none())
        }
        ReportFormat::Csv | ReportFormat::Json => {
            let report = load_report(&ledger_path, &options)?;
            let mut view = TransactionView::from_report(report);
            view.set_filter(filter);
            let Some(report) = view.filtered_report() else {
                return Ok(false);
            };

            let export_path = cli
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from("<stdout>"));
            let mut buf = Vec::new();
            let count = if format == ReportFormat::Csv {
                export_csv(&report.summaries, &mut buf, &export_path)?
            } else {
                export_json(&report, &mut buf, &export_path)?
            };
            write_output(cli.output.as_deref(), &buf)?;

            tracing::info!(rows = count, path = %export_path.display(), "Export complete");
            Ok(true)
        }
    }
}

/// Load config from `--config` (which must exist) or the platform default
/// (which may be absent).
fn load_cli_config(cli: &Cli) -> util::error::Result<(AppConfig, Vec<String>)> {
    let config_path = match cli.config {
        Some(ref path) => {
            if !path.is_file() {
                return Err(LedgerError::Config(ConfigError::Io {
                    path: path.clone(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "config file not found",
                    ),
                }));
            }
            path.clone()
        }
        None => PlatformPaths::resolve().config_file(),
    };
    Ok(load_config(&config_path))
}

/// Write `bytes` to `path`, or to stdout when no path is given.
fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<(), ExportError> {
    match path {
        Some(path) => std::fs::write(path, bytes).map_err(|e| ExportError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(bytes)
                .and_then(|()| stdout.flush())
                .map_err(|e| ExportError::Io {
                    path: PathBuf::from("<stdout>"),
                    source: e,
                })
        }
    }
}
