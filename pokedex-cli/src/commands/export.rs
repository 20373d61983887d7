use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use pokedex_api::async_util::run_with_events;
use pokedex_api::{ExportEvent, ExportResult, LogEntry, PokeApiClient, export_all};
use pokedex_core::format::format_id;

use crate::error::CliError;
use crate::settings::{self, ExportOverrides, ResolvedExport, Settings};

/// Run the export command.
pub(crate) fn run_export(
    overrides: ExportOverrides,
    no_log: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let saved = Settings::load()?;
    let resolved = settings::resolve_export(&overrides, &saved.export)?;

    log::info!(
        "Exporting Pokémon {}-{} from {}",
        format_id(1),
        format_id(resolved.options.limit),
        resolved.options.base_url.if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!(
        "{}",
        format!(
            "Output: {} ({}, {} at a time)",
            resolved.output.display(),
            resolved.format,
            resolved.options.concurrency,
        )
        .if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!("");

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {e}")))?;
    let result = rt.block_on(fetch_tables(&resolved, quiet))?;

    print_summary(&result);

    let sheets = result.tables.to_sheets();
    let writer = resolved.format.writer();
    writer.write(&sheets, &resolved.output)?;
    log::info!(
        "{} {} written to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        writer.name(),
        resolved.output.display().if_supports_color(Stdout, |t| t.cyan()),
    );

    if !no_log {
        let log_path = resolved.log_path();
        if let Err(e) = result.log.write_to_file(&log_path, &result.tables) {
            log::warn!("Warning: could not write export log: {}", e);
        } else {
            log::info!(
                "{}",
                format!("Log: {}", log_path.display()).if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }

    Ok(())
}

async fn fetch_tables(resolved: &ResolvedExport, quiet: bool) -> Result<ExportResult, CliError> {
    let client = PokeApiClient::new(resolved.request_interval)?;

    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(u64::from(resolved.options.limit));
        pb.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    };

    let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel::<ExportEvent>();

    let result = run_with_events(
        export_all(&client, &resolved.options, event_tx),
        event_rx,
        |e| match e {
            ExportEvent::Started { total } => {
                pb.set_length(u64::from(total));
            }
            ExportEvent::PokemonStarted { id } => {
                pb.set_message(format!("Fetching #{}", format_id(id)));
            }
            ExportEvent::PokemonExported { id, name, degraded } => {
                let marker = if degraded { " (partial)" } else { "" };
                pb.set_message(format!("#{} {}{}", format_id(id), name, marker));
                pb.inc(1);
            }
            ExportEvent::PokemonSkipped { id, .. } => {
                pb.set_message(format!("#{} skipped", format_id(id)));
                pb.inc(1);
            }
            ExportEvent::Done => {}
        },
    )
    .await;

    pb.finish_and_clear();
    Ok(result?)
}

fn print_summary(result: &ExportResult) {
    let summary = result.log.summary();
    let tables = &result.tables;
    let has_issues = summary.degraded > 0 || summary.skipped > 0;

    // In quiet mode, re-emit the header as warn for context
    if has_issues && log::max_level() < LevelFilter::Info {
        log::warn!("Export finished with issues:");
    }

    log::info!("{}", "Summary:".if_supports_color(Stdout, |t| t.bold()));
    log::info!(
        "  {} {} Pokémon exported",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        summary.total_rows(),
    );
    log::info!(
        "{}",
        format!(
            "    abilities {}, locations {}, moves {}, evolutions {}",
            tables.abilities.len(),
            tables.locations.len(),
            tables.moves.len(),
            tables.evolutions.len(),
        )
        .if_supports_color(Stdout, |t| t.dimmed()),
    );
    if summary.degraded > 0 {
        log::warn!(
            "  {} {} exported with missing details",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            summary.degraded,
        );
    }
    if summary.skipped > 0 {
        log::warn!(
            "  {} {} skipped",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            summary.skipped,
        );
    }

    for entry in result.log.entries() {
        match entry {
            LogEntry::Degraded { id, name, warnings } => {
                log::warn!(
                    "  {} #{} {}",
                    "~".if_supports_color(Stdout, |t| t.yellow()),
                    format_id(*id),
                    name,
                );
                for w in warnings {
                    log::warn!("      {}", w);
                }
            }
            LogEntry::Skipped { id, reason } => {
                log::warn!("{}", skipped_line(*id, reason));
            }
            LogEntry::Exported { .. } => {}
        }
    }
    log::info!("");
}

fn skipped_line(id: u32, reason: &str) -> String {
    format!(
        "  {} #{}: {}",
        "\u{2718}".if_supports_color(Stdout, |t| t.red()),
        format_id(id),
        reason,
    )
}
