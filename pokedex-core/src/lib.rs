pub mod dedup;
pub mod format;
pub mod records;
pub mod table;

pub use dedup::{UniqueKey, unique, unique_by};
pub use format::format_id;
pub use records::{
    AbilityRecord, BaseStats, EvolutionLevel, EvolutionRecord, ExportTables, LocationRecord,
    MoveLevel, MoveRecord, PokemonRecord,
};
pub use table::{Cell, Row, Sheet};
