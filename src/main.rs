//! archselect - command line entry point
//!
//! Shows a menu on the terminal and prints the outcome as JSON on stdout once
//! the terminal has been restored.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use archselect::cli::{Cli, Commands};
use archselect::config::MenuConfig;
use archselect::context::MenuContext;
use archselect::frontend::TerminalFrontend;
use archselect::menu::{SelectionEngine, SelectionResult};
use archselect::table::{ColumnFormatter, TableMenu};

/// Exit status for an operator interrupt, as for SIGINT
const EXIT_INTERRUPTED: u8 = 130;

/// Log file used when `--log-file` is not given
const DEFAULT_LOG_FILE: &str = "archselect.log";

/// Initialize file logging; RUST_LOG overrides the default `info` level
fn init_logging(path: Option<&Path>) -> Result<PathBuf> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_FILE));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(path)
}

/// Main application entry point
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match init_logging(cli.log_file.as_deref()) {
        Ok(path) => debug!("Logging to {:?}", path),
        Err(e) => {
            eprintln!("✗ {:#}", e);
            return ExitCode::FAILURE;
        }
    }
    info!("archselect starting up");

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("✗ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Select {
            options,
            multi,
            mandatory,
            default,
            no_sort,
            preset,
            title,
            config,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(title) = title {
                config.title = title;
            }
            if multi {
                config.multi = true;
            }
            if mandatory {
                config.allow_skip = false;
            }
            if default.is_some() {
                config.default = default;
            }
            if no_sort {
                config.sort = false;
            }

            let ctx = MenuContext::new();
            let mut engine = SelectionEngine::from_labels(options, config)?
                .with_presets(preset)
                .with_keybindings(ctx.keybindings.clone());

            let result = {
                let mut frontend = TerminalFrontend::new(&ctx)?;
                engine.run(&mut frontend)?
            };
            print_result(&result)
        }
        Commands::Table {
            data,
            columns,
            multi,
            preset_index,
            custom,
            preview,
            config,
        } => {
            let content = fs::read_to_string(&data)
                .with_context(|| format!("Failed to read table data from {:?}", data))?;
            let records: Vec<Value> =
                serde_json::from_str(&content).context("Table data must be a JSON array")?;
            debug!("Loaded {} records from {:?}", records.len(), data);

            let presets = preset_index
                .iter()
                .map(|&idx| {
                    records.get(idx).cloned().with_context(|| {
                        format!("Preset index {} is out of range ({} records)", idx, records.len())
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            let mut config = load_config(config.as_deref())?;
            if multi {
                config.multi = true;
            }
            if !custom.is_empty() {
                config = config.with_extra_options(custom);
            }

            let formatter = if columns.is_empty() {
                ColumnFormatter::new()
            } else {
                ColumnFormatter::with_columns(columns)
            };

            let ctx = MenuContext::new().with_preview_location(preview.unwrap_or_default());
            let mut menu = TableMenu::new(records, formatter, config)
                .with_presets(presets)
                .with_keybindings(ctx.keybindings.clone());
            if preview.is_some() {
                menu = menu.with_preview(|record: &Value| serde_json::to_string_pretty(record).ok());
            }

            let result = {
                let mut frontend = TerminalFrontend::new(&ctx)?;
                menu.run(&mut frontend)?
            };
            print_result(&result)
        }
        Commands::Validate { config } => {
            info!("Validating configuration file: {:?}", config);
            let menu_config = MenuConfig::load_from_file(&config)?;
            menu_config
                .validate()
                .with_context(|| format!("Configuration validation failed for {:?}", config))?;
            info!("Configuration validation successful");
            println!("✓ Configuration file is valid: {:?}", config);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<MenuConfig> {
    match path {
        Some(path) => {
            info!("Loading menu configuration from {:?}", path);
            MenuConfig::load_from_file(path)
        }
        None => Ok(MenuConfig::default()),
    }
}

fn print_result<V: Serialize>(result: &SelectionResult<V>) -> Result<ExitCode> {
    let json = serde_json::to_string(result).context("Failed to serialize selection result")?;
    println!("{}", json);

    Ok(match result {
        SelectionResult::Interrupted => ExitCode::from(EXIT_INTERRUPTED),
        _ => ExitCode::SUCCESS,
    })
}
