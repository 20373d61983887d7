//! Persistent settings and option resolution for the `export` command.
//!
//! Every export option is resolved through the same priority chain:
//!
//! 1. CLI flag (if given)
//! 2. `[export]` table in `settings.toml`
//! 3. Built-in default

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use pokedex_api::client::DEFAULT_REQUEST_INTERVAL;
use pokedex_api::{DEFAULT_BASE_URL, DEFAULT_LIMIT, ExportOptions, MAX_LIMIT};
use pokedex_sheets::SheetFormat;
use serde::Deserialize;

use crate::error::CliError;

const DEFAULT_OUTPUT_STEM: &str = "pokemon_data";

/// Canonical path to the settings file: `~/.config/pokedex-export/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("pokedex-export").join("settings.toml")
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub export: ExportSettings,
}

/// The `[export]` table. Absent keys fall through to the defaults.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct ExportSettings {
    pub limit: Option<u32>,
    pub output: Option<PathBuf>,
    pub format: Option<String>,
    pub concurrency: Option<usize>,
    pub base_url: Option<String>,
    pub request_interval_ms: Option<u64>,
}

impl Settings {
    /// Load settings from the canonical path.
    pub(crate) fn load() -> Result<Self, CliError> {
        Self::load_from(&settings_path())
    }

    /// Load settings from `path`. A missing file yields the defaults; a file
    /// that exists but does not parse is an error.
    pub(crate) fn load_from(path: &Path) -> Result<Self, CliError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        toml::from_str(&contents)
            .map_err(|e| CliError::config(format!("{}: {e}", path.display())))
    }
}

/// Set (or with `None`, remove) one key of the `[export]` table.
///
/// Uses `toml::Value` for a surgical update so unrelated keys and tables
/// are preserved. The file is replaced atomically.
pub(crate) fn set_export_value(
    path: &Path,
    key: &str,
    value: Option<toml::Value>,
) -> io::Result<()> {
    let mut doc: toml::Value = if let Ok(contents) = std::fs::read_to_string(path) {
        contents
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
    } else {
        toml::Value::Table(Default::default())
    };

    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let export = table
        .entry("export")
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let export_table = export
        .as_table_mut()
        .ok_or_else(|| io::Error::other("[export] is not a table"))?;

    match value {
        Some(v) => {
            export_table.insert(key.to_string(), v);
        }
        None => {
            export_table.remove(key);
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, path)?;

    Ok(())
}

/// Load the settings file as a pretty-printed TOML string for display.
pub(crate) fn load_settings_string(path: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}

/// Export options given on the command line.
#[derive(Debug, Default, Clone)]
pub(crate) struct ExportOverrides {
    pub limit: Option<u32>,
    pub output: Option<PathBuf>,
    pub format: Option<SheetFormat>,
    pub concurrency: Option<usize>,
    pub base_url: Option<String>,
    pub request_interval_ms: Option<u64>,
}

/// Fully resolved export configuration.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedExport {
    pub options: ExportOptions,
    pub output: PathBuf,
    pub format: SheetFormat,
    pub request_interval: Duration,
}

impl ResolvedExport {
    /// Path of the plain-text export log: `<output stem>.log` beside the output.
    pub(crate) fn log_path(&self) -> PathBuf {
        let stem = self
            .output
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_OUTPUT_STEM.to_string());
        self.output.with_file_name(format!("{stem}.log"))
    }
}

/// Resolve every export option from CLI overrides, then settings, then defaults.
pub(crate) fn resolve_export(
    cli: &ExportOverrides,
    settings: &ExportSettings,
) -> Result<ResolvedExport, CliError> {
    let format = match (cli.format, settings.format.as_deref()) {
        (Some(f), _) => f,
        (None, Some(s)) => s.parse().map_err(|e| CliError::config(format!("{e}")))?,
        (None, None) => SheetFormat::default(),
    };

    let limit = cli.limit.or(settings.limit).unwrap_or(DEFAULT_LIMIT);
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(CliError::config(format!(
            "limit must be between 1 and {MAX_LIMIT}, got {limit}"
        )));
    }

    let concurrency = cli.concurrency.or(settings.concurrency).unwrap_or(1);
    if concurrency == 0 {
        return Err(CliError::config("concurrency must be at least 1"));
    }

    let base_url = cli
        .base_url
        .clone()
        .or_else(|| settings.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let base_url = base_url.trim_end_matches('/').to_string();
    if base_url.is_empty() {
        return Err(CliError::config("base URL must not be empty"));
    }

    let request_interval = cli
        .request_interval_ms
        .or(settings.request_interval_ms)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_REQUEST_INTERVAL);

    let output = cli
        .output
        .clone()
        .or_else(|| settings.output.clone())
        .map(|p| output_for_format(p, format))
        .unwrap_or_else(|| default_output(format));

    Ok(ResolvedExport {
        options: ExportOptions {
            base_url,
            limit,
            concurrency,
        },
        output,
        format,
        request_interval,
    })
}

fn default_output(format: SheetFormat) -> PathBuf {
    match format {
        SheetFormat::Xlsx => PathBuf::from(format!("{DEFAULT_OUTPUT_STEM}.xlsx")),
        SheetFormat::Csv => PathBuf::from(DEFAULT_OUTPUT_STEM),
    }
}

/// CSV output is a directory, so a workbook extension is dropped.
fn output_for_format(path: PathBuf, format: SheetFormat) -> PathBuf {
    let is_xlsx = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
    match format {
        SheetFormat::Csv if is_xlsx => path.with_extension(""),
        _ => path,
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
