//! pokedex-export CLI
//!
//! Command-line interface for exporting PokeAPI data to spreadsheets.

mod commands;
mod error;
mod settings;

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use pokedex_sheets::SheetFormat;

use crate::error::CliError;
use crate::settings::ExportOverrides;

#[derive(Parser)]
#[command(name = "pokedex-export")]
#[command(about = "Export Pokémon data from PokeAPI into spreadsheets", long_about = None)]
struct Cli {
    /// Show debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options for the export command. Anything omitted falls back to
/// `settings.toml`, then to the built-in default.
#[derive(Args, Clone)]
struct ExportArgs {
    /// Export Pokémon 1 through N (1-999, default 151)
    #[arg(short, long)]
    limit: Option<u32>,

    /// Output workbook (xlsx) or directory (csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: xlsx or csv
    #[arg(short, long)]
    format: Option<SheetFormat>,

    /// Number of Pokémon fetched at once (default 1)
    #[arg(short, long)]
    concurrency: Option<usize>,

    /// PokeAPI root URL
    #[arg(long)]
    base_url: Option<String>,

    /// Minimum delay between HTTP requests, in milliseconds (default 100)
    #[arg(long)]
    request_interval_ms: Option<u64>,

    /// Disable the export log file
    #[arg(long)]
    no_log: bool,
}

impl ExportArgs {
    fn overrides(&self) -> ExportOverrides {
        ExportOverrides {
            limit: self.limit,
            output: self.output.clone(),
            format: self.format,
            concurrency: self.concurrency,
            base_url: self.base_url.clone(),
            request_interval_ms: self.request_interval_ms,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch Pokémon data and write the five sheets
    Export(ExportArgs),

    /// Manage saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the settings file and the effective export options
    Show,

    /// Print the settings file path
    Path,

    /// Save the default number of Pokémon to export
    SetLimit {
        /// Highest Pokémon ID (1-999)
        limit: u32,
    },

    /// Save the default output path
    SetOutput {
        /// Workbook file or CSV directory
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Export(args) => {
            commands::export::run_export(args.overrides(), args.no_log, cli.quiet)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::SetLimit { limit } => commands::config::run_config_set_limit(limit),
            ConfigAction::SetOutput { path } => commands::config::run_config_set_output(&path),
        },
    };

    if let Err(e) = result {
        report_error(&e);
        std::process::exit(1);
    }
}

/// Plain-message logger on stdout. `RUST_LOG` still overrides the level.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter_module("pokedex_export", level)
        .filter_module("pokedex_api", level)
        .filter_module("pokedex_sheets", level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

fn report_error(e: &CliError) {
    log::error!(
        "{} {}",
        "\u{2718}".if_supports_color(Stdout, |t| t.red()),
        e,
    );
}
