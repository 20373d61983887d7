use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use pokedex_api::MAX_LIMIT;

use crate::error::CliError;
use crate::settings::{self, ExportOverrides, Settings};

/// Show the settings file and the export options it resolves to.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = settings::settings_path();

    log::info!("{}", "Export Settings".if_supports_color(Stdout, |t| t.bold()));
    log::info!("");

    let exists = path.exists();
    let status = if exists { "(exists)" } else { "(not found)" };
    log::info!(
        "  Settings file: {} {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        status.if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!("");

    if exists {
        match settings::load_settings_string(&path) {
            Some(contents) => {
                for line in contents.lines() {
                    log::info!("    {}", line);
                }
            }
            None => log::warn!(
                "  {} Settings file could not be parsed",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            ),
        }
        log::info!("");
    }

    let saved = Settings::load_from(&path)?;
    let resolved = settings::resolve_export(&ExportOverrides::default(), &saved.export)?;

    log::info!("{}", "Effective export options:".if_supports_color(Stdout, |t| t.bold()));
    let fields = [
        ("limit", resolved.options.limit.to_string()),
        ("output", resolved.output.display().to_string()),
        ("format", resolved.format.to_string()),
        ("concurrency", resolved.options.concurrency.to_string()),
        ("base_url", resolved.options.base_url.clone()),
        (
            "request_interval_ms",
            resolved.request_interval.as_millis().to_string(),
        ),
    ];
    for (name, value) in fields {
        log::info!(
            "  {} {}",
            format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
            value,
        );
    }

    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    println!("{}", settings::settings_path().display());
}

/// Save the default export limit.
pub(crate) fn run_config_set_limit(limit: u32) -> Result<(), CliError> {
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(CliError::config(format!(
            "limit must be between 1 and {MAX_LIMIT}, got {limit}"
        )));
    }
    let path = settings::settings_path();
    settings::set_export_value(&path, "limit", Some(toml::Value::Integer(i64::from(limit))))?;
    report_saved("limit", &limit.to_string(), &path);
    Ok(())
}

/// Save the default output path.
pub(crate) fn run_config_set_output(output: &Path) -> Result<(), CliError> {
    let value = output.to_string_lossy().into_owned();
    if value.is_empty() {
        return Err(CliError::config("output path must not be empty"));
    }
    let path = settings::settings_path();
    settings::set_export_value(&path, "output", Some(toml::Value::String(value.clone())))?;
    report_saved("output", &value, &path);
    Ok(())
}

fn report_saved(key: &str, value: &str, path: &Path) {
    log::info!(
        "{} Saved {} = {} to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        key,
        value.if_supports_color(Stdout, |t| t.cyan()),
        path.display(),
    );
}
