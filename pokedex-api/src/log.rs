use std::path::Path;

use pokedex_core::ExportTables;
use pokedex_core::format::format_id;

/// Per-ID outcome of an export run.
#[derive(Debug, Clone, PartialEq)]
pub enum LogEntry {
    /// All five lookups succeeded.
    Exported { id: u32, name: String },
    /// Exported, but some secondary lookups fell back to placeholders.
    Degraded {
        id: u32,
        name: String,
        warnings: Vec<String>,
    },
    /// The main or species lookup failed; the ID is absent from every table.
    Skipped { id: u32, reason: String },
}

impl LogEntry {
    pub fn id(&self) -> u32 {
        match self {
            LogEntry::Exported { id, .. }
            | LogEntry::Degraded { id, .. }
            | LogEntry::Skipped { id, .. } => *id,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogSummary {
    pub exported: usize,
    pub degraded: usize,
    pub skipped: usize,
}

impl LogSummary {
    /// Pokémon that made it into the tables, degraded or not.
    pub fn total_rows(&self) -> usize {
        self.exported + self.degraded
    }
}

/// Collects per-ID outcomes and writes them as a plain-text report.
#[derive(Debug, Default, Clone)]
pub struct ExportLog {
    entries: Vec<LogEntry>,
}

impl ExportLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// IDs that produced no rows at all.
    pub fn skipped_ids(&self) -> Vec<u32> {
        self.entries
            .iter()
            .filter(|e| matches!(e, LogEntry::Skipped { .. }))
            .map(LogEntry::id)
            .collect()
    }

    pub fn summary(&self) -> LogSummary {
        let mut summary = LogSummary::default();
        for entry in &self.entries {
            match entry {
                LogEntry::Exported { .. } => summary.exported += 1,
                LogEntry::Degraded { .. } => summary.degraded += 1,
                LogEntry::Skipped { .. } => summary.skipped += 1,
            }
        }
        summary
    }

    /// Write the log, with row counts from `tables`, to a file.
    pub fn write_to_file(&self, path: &Path, tables: &ExportTables) -> std::io::Result<()> {
        use std::io::Write;

        let mut file = std::fs::File::create(path)?;
        let summary = self.summary();

        writeln!(file, "=== Export Log ===")?;
        writeln!(
            file,
            "Date: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(file)?;
        writeln!(file, "--- Summary ---")?;
        writeln!(file, "Exported: {}", summary.exported)?;
        writeln!(file, "Degraded: {}", summary.degraded)?;
        writeln!(file, "Skipped: {}", summary.skipped)?;
        writeln!(
            file,
            "Rows: pokemon {}, abilities {}, locations {}, moves {}, evolutions {}",
            tables.pokemon.len(),
            tables.abilities.len(),
            tables.locations.len(),
            tables.moves.len(),
            tables.evolutions.len(),
        )?;
        writeln!(file)?;
        writeln!(file, "--- Details ---")?;
        writeln!(file)?;

        for entry in &self.entries {
            match entry {
                LogEntry::Exported { id, name } => {
                    writeln!(file, "[OK] #{} {}", format_id(*id), name)?;
                }
                LogEntry::Degraded { id, name, warnings } => {
                    writeln!(file, "[DEGRADED] #{} {}", format_id(*id), name)?;
                    for w in warnings {
                        writeln!(file, "     Warning: {}", w)?;
                    }
                }
                LogEntry::Skipped { id, reason } => {
                    writeln!(file, "[SKIPPED] #{}", format_id(*id))?;
                    writeln!(file, "     Reason: {}", reason)?;
                }
            }
        }

        Ok(())
    }
}
