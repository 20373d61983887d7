//! The export pipeline: fetch every Pokémon in `1..=limit`, extract the five
//! tables, and assemble them in ID order.

use std::pin::pin;

use futures::stream::{self, StreamExt};
use pokedex_core::{
    AbilityRecord, EvolutionRecord, ExportTables, LocationRecord, MoveRecord, PokemonRecord,
};
use tokio::sync::mpsc;

use crate::client::{self, DEFAULT_BASE_URL, Fetch, fetch_typed};
use crate::error::ApiError;
use crate::evolution;
use crate::extract;
use crate::log::{ExportLog, LogEntry};
use crate::types::{PokemonPayload, SpeciesPayload};

pub const DEFAULT_LIMIT: u32 = 151;
/// Pokémon IDs must stay three digits wide to remain a join key.
pub const MAX_LIMIT: u32 = 999;

/// Options for an export run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// API root, without a trailing slash
    pub base_url: String,
    /// Highest Pokémon ID to export (IDs run from 1)
    pub limit: u32,
    /// How many IDs may be in flight at once; 1 is fully sequential
    pub concurrency: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            limit: DEFAULT_LIMIT,
            concurrency: 1,
        }
    }
}

impl ExportOptions {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.limit == 0 || self.limit > MAX_LIMIT {
            return Err(ApiError::config(format!(
                "limit must be between 1 and {MAX_LIMIT}, got {}",
                self.limit
            )));
        }
        if self.concurrency == 0 {
            return Err(ApiError::config("concurrency must be at least 1"));
        }
        Ok(())
    }
}

/// Progress events emitted during an export, consumed by the CLI.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportEvent {
    /// The run is starting with this many IDs.
    Started { total: u32 },
    /// An ID has started fetching.
    PokemonStarted { id: u32 },
    /// An ID's rows were added to the tables.
    PokemonExported { id: u32, name: String, degraded: bool },
    /// An ID was dropped because a primary lookup failed.
    PokemonSkipped { id: u32, reason: String },
    /// All IDs processed and tables deduplicated.
    Done,
}

/// Everything one Pokémon contributes to the five tables.
#[derive(Debug, Clone, PartialEq)]
pub struct PokemonBundle {
    pub pokemon: PokemonRecord,
    pub abilities: Vec<AbilityRecord>,
    pub locations: Vec<LocationRecord>,
    pub moves: Vec<MoveRecord>,
    pub evolutions: Vec<EvolutionRecord>,
}

/// Result of processing a single ID.
#[derive(Debug, Clone, PartialEq)]
pub enum PokemonOutcome {
    Exported {
        bundle: Box<PokemonBundle>,
        warnings: Vec<String>,
    },
    Skipped {
        reason: String,
    },
}

/// Final tables plus the per-ID log.
#[derive(Debug, Clone)]
pub struct ExportResult {
    pub tables: ExportTables,
    pub log: ExportLog,
}

/// Export every ID in `1..=options.limit`.
///
/// Up to `options.concurrency` IDs are fetched at once, but results are
/// merged strictly in ID order, so the tables come out the same regardless
/// of concurrency. Moves and Evolutions are deduplicated once everything is
/// merged.
pub async fn export_all<F: Fetch>(
    fetcher: &F,
    options: &ExportOptions,
    events: mpsc::UnboundedSender<ExportEvent>,
) -> Result<ExportResult, ApiError> {
    options.validate()?;

    let _ = events.send(ExportEvent::Started {
        total: options.limit,
    });

    let mut tables = ExportTables::new();
    let mut log = ExportLog::new();

    let mut outcomes = pin!(
        stream::iter(1..=options.limit)
            .map(|id| {
                let events = events.clone();
                async move {
                    let _ = events.send(ExportEvent::PokemonStarted { id });
                    (id, export_pokemon(fetcher, &options.base_url, id).await)
                }
            })
            .buffered(options.concurrency)
    );

    while let Some((id, outcome)) = outcomes.next().await {
        match outcome {
            PokemonOutcome::Exported { bundle, warnings } => {
                let name = bundle.pokemon.name.clone();
                let degraded = !warnings.is_empty();
                merge_bundle(&mut tables, *bundle);

                if degraded {
                    log::debug!("#{id} {name}: exported with {} warning(s)", warnings.len());
                    log.add(LogEntry::Degraded {
                        id,
                        name: name.clone(),
                        warnings,
                    });
                } else {
                    log.add(LogEntry::Exported {
                        id,
                        name: name.clone(),
                    });
                }
                let _ = events.send(ExportEvent::PokemonExported { id, name, degraded });
            }
            PokemonOutcome::Skipped { reason } => {
                log::debug!("#{id} skipped: {reason}");
                log.add(LogEntry::Skipped {
                    id,
                    reason: reason.clone(),
                });
                let _ = events.send(ExportEvent::PokemonSkipped { id, reason });
            }
        }
    }

    tables.dedup();
    let _ = events.send(ExportEvent::Done);

    Ok(ExportResult { tables, log })
}

/// Fetch and extract everything for one Pokémon ID.
///
/// A failed main or species lookup skips the ID entirely. Failed ability,
/// encounter, or evolution lookups only degrade the bundle and are reported
/// as warnings.
pub async fn export_pokemon<F: Fetch>(fetcher: &F, base_url: &str, id: u32) -> PokemonOutcome {
    let pokemon: PokemonPayload =
        match fetch_typed(fetcher, &client::pokemon_url(base_url, id)).await {
            Ok(p) => p,
            Err(e) => {
                return PokemonOutcome::Skipped {
                    reason: format!("Main lookup failed: {e}"),
                };
            }
        };

    let species: SpeciesPayload = match fetch_typed(fetcher, &pokemon.species.url).await {
        Ok(s) => s,
        Err(e) => {
            return PokemonOutcome::Skipped {
                reason: format!("Species lookup failed: {e}"),
            };
        }
    };

    let mut warnings = Vec::new();

    let record = extract::extract_main(id, &pokemon, &species);
    let abilities = extract::fetch_abilities(fetcher, id, &pokemon, &mut warnings).await;
    let locations =
        extract::fetch_locations(fetcher, base_url, id, &pokemon.name, &mut warnings).await;
    let moves = extract::extract_moves(id, &pokemon);
    let evolutions = match evolution::resolve_from_species(fetcher, &species).await {
        Ok(edges) => edges,
        Err(e) => {
            warnings.push(format!("Evolution chain unavailable: {e}"));
            Vec::new()
        }
    };

    log::debug!(
        "#{id} {}: {} abilities, {} locations, {} moves, {} evolution edges",
        pokemon.name,
        abilities.len(),
        locations.len(),
        moves.len(),
        evolutions.len(),
    );

    PokemonOutcome::Exported {
        bundle: Box::new(PokemonBundle {
            pokemon: record,
            abilities,
            locations,
            moves,
            evolutions,
        }),
        warnings,
    }
}

fn merge_bundle(tables: &mut ExportTables, bundle: PokemonBundle) {
    tables.pokemon.push(bundle.pokemon);
    tables.abilities.extend(bundle.abilities);
    tables.locations.extend(bundle.locations);
    tables.moves.extend(bundle.moves);
    tables.evolutions.extend(bundle.evolutions);
}

#[cfg(test)]
#[path = "tests/export_tests.rs"]
mod tests;
