//! Flat row types for the five exported tables.
//!
//! All IDs are stored already formatted (see [`crate::format::format_id`]),
//! since the zero-padded string is what joins the tables together.

use std::fmt;

use crate::dedup::{self, UniqueKey};
use crate::table::{Cell, Row, Sheet};

/// Level at which a move is learned. Only level-up moves carry a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveLevel {
    Level(u32),
    NotApplicable,
}

impl fmt::Display for MoveLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveLevel::Level(n) => write!(f, "{n}"),
            MoveLevel::NotApplicable => write!(f, "N/A"),
        }
    }
}

impl From<MoveLevel> for Cell {
    fn from(level: MoveLevel) -> Self {
        match level {
            MoveLevel::Level(n) => n.into(),
            MoveLevel::NotApplicable => Cell::Text("N/A".to_string()),
        }
    }
}

/// Minimum level of an evolution edge, when the chain records one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvolutionLevel {
    Level(u32),
    Unknown,
}

impl From<Option<u32>> for EvolutionLevel {
    fn from(level: Option<u32>) -> Self {
        level.map_or(EvolutionLevel::Unknown, EvolutionLevel::Level)
    }
}

impl fmt::Display for EvolutionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvolutionLevel::Level(n) => write!(f, "{n}"),
            EvolutionLevel::Unknown => write!(f, "Unknown"),
        }
    }
}

impl From<EvolutionLevel> for Cell {
    fn from(level: EvolutionLevel) -> Self {
        match level {
            EvolutionLevel::Level(n) => n.into(),
            EvolutionLevel::Unknown => Cell::Text("Unknown".to_string()),
        }
    }
}

/// Six base stats, keyed the way the API names them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
}

/// One row of the Pokemon sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct PokemonRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Type names joined with `", "`, in slot order
    pub types: String,
    pub gender: String,
    pub stats: BaseStats,
    /// Weight in hectograms
    pub weight: u32,
    /// Height in decimetres
    pub height: u32,
    /// Some forms have no recorded base experience
    pub base_experience: Option<u32>,
}

impl Row for PokemonRecord {
    const SHEET: &'static str = "Pokemon";
    const HEADERS: &'static [&'static str] = &[
        "Pokemon ID",
        "Name",
        "Description",
        "Types",
        "Gender",
        "HP",
        "Attack",
        "Defense",
        "Special Attack",
        "Special Defense",
        "Speed",
        "Weight",
        "Height",
        "Base Experience",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            (&self.id).into(),
            (&self.name).into(),
            (&self.description).into(),
            (&self.types).into(),
            (&self.gender).into(),
            self.stats.hp.into(),
            self.stats.attack.into(),
            self.stats.defense.into(),
            self.stats.special_attack.into(),
            self.stats.special_defense.into(),
            self.stats.speed.into(),
            self.weight.into(),
            self.height.into(),
            self.base_experience.into(),
        ]
    }
}

/// One row of the Abilities sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct AbilityRecord {
    pub pokemon_id: String,
    pub ability_id: String,
    pub name: String,
    pub hidden: bool,
    pub short_effect: String,
}

impl Row for AbilityRecord {
    const SHEET: &'static str = "Abilities";
    const HEADERS: &'static [&'static str] =
        &["Pokemon ID", "Ability ID", "Ability", "Hidden Ability", "Effect"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            (&self.pokemon_id).into(),
            (&self.ability_id).into(),
            (&self.name).into(),
            self.hidden.into(),
            (&self.short_effect).into(),
        ]
    }
}

/// One row of the Locations sheet: a (location-area, version) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRecord {
    pub pokemon_id: String,
    pub pokemon: String,
    pub location: String,
    pub version: String,
}

impl Row for LocationRecord {
    const SHEET: &'static str = "Locations";
    const HEADERS: &'static [&'static str] = &["Pokemon ID", "Pokemon", "Location", "Version"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            (&self.pokemon_id).into(),
            (&self.pokemon).into(),
            (&self.location).into(),
            (&self.version).into(),
        ]
    }
}

/// One row of the Moves sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveRecord {
    pub pokemon_id: String,
    pub name: String,
    pub method: String,
    pub level: MoveLevel,
}

impl Row for MoveRecord {
    const SHEET: &'static str = "Moves";
    const HEADERS: &'static [&'static str] = &["Pokemon ID", "Move", "Method", "Level"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            (&self.pokemon_id).into(),
            (&self.name).into(),
            (&self.method).into(),
            self.level.into(),
        ]
    }
}

impl UniqueKey for MoveRecord {
    type Key = (String, String, String, MoveLevel);

    fn unique_key(&self) -> Self::Key {
        (
            self.pokemon_id.clone(),
            self.name.clone(),
            self.method.clone(),
            self.level,
        )
    }
}

/// One parent -> child edge of an evolution chain.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionRecord {
    pub parent: String,
    pub parent_id: String,
    pub child: String,
    pub child_id: String,
    pub level: EvolutionLevel,
}

impl Row for EvolutionRecord {
    const SHEET: &'static str = "Evolutions";
    const HEADERS: &'static [&'static str] = &["Parent", "Parent ID", "Child", "Child ID", "Level"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            (&self.parent).into(),
            (&self.parent_id).into(),
            (&self.child).into(),
            (&self.child_id).into(),
            self.level.into(),
        ]
    }
}

impl UniqueKey for EvolutionRecord {
    type Key = (String, String, EvolutionLevel);

    fn unique_key(&self) -> Self::Key {
        (self.parent.clone(), self.child.clone(), self.level)
    }
}

/// The five exported collections, in sheet order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportTables {
    pub pokemon: Vec<PokemonRecord>,
    pub abilities: Vec<AbilityRecord>,
    pub locations: Vec<LocationRecord>,
    pub moves: Vec<MoveRecord>,
    pub evolutions: Vec<EvolutionRecord>,
}

impl ExportTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapse duplicate moves and evolution edges. The other three tables
    /// are unique per Pokémon by construction and are left alone.
    pub fn dedup(&mut self) {
        self.moves = dedup::unique(std::mem::take(&mut self.moves));
        self.evolutions = dedup::unique(std::mem::take(&mut self.evolutions));
    }

    /// Lay out all five tables as sheets, in export order.
    pub fn to_sheets(&self) -> Vec<Sheet> {
        vec![
            Sheet::from_records(&self.pokemon),
            Sheet::from_records(&self.abilities),
            Sheet::from_records(&self.locations),
            Sheet::from_records(&self.moves),
            Sheet::from_records(&self.evolutions),
        ]
    }
}

#[cfg(test)]
#[path = "tests/records_tests.rs"]
mod tests;
