pub mod async_util;
pub mod client;
pub mod error;
pub mod evolution;
pub mod export;
pub mod extract;
pub mod log;
pub mod types;

pub use client::{DEFAULT_BASE_URL, Fetch, FetchResponse, PokeApiClient};
pub use error::ApiError;
pub use evolution::EvolutionTree;
pub use export::{
    DEFAULT_LIMIT, ExportEvent, ExportOptions, ExportResult, MAX_LIMIT, PokemonBundle,
    PokemonOutcome, export_all, export_pokemon,
};
pub use log::{ExportLog, LogEntry, LogSummary};

#[cfg(test)]
#[path = "tests/fixtures.rs"]
pub(crate) mod fixtures;
