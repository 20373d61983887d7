//! Typed subsets of the PokeAPI responses this tool consumes.
//!
//! Only the fields the extractors read are modelled. Anything else in the
//! payload is ignored, and a missing required field fails deserialization
//! at the fetch boundary instead of surfacing later as a bad cell.

use serde::Deserialize;

use crate::error::ApiError;

/// A `{ name, url }` reference to another API resource.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

impl NamedResource {
    /// Numeric ID taken from the last path segment of the resource URL
    /// (`.../ability/65/` -> `65`).
    pub fn id(&self) -> Result<u32, ApiError> {
        resource_id(&self.url)
    }
}

/// A bare `{ url }` reference (used for evolution chains).
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ApiResource {
    pub url: String,
}

/// Parse the trailing numeric segment of a PokeAPI resource URL.
pub fn resource_id(url: &str) -> Result<u32, ApiError> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
        .ok_or_else(|| ApiError::invalid_payload(format!("No numeric ID in URL '{url}'")))
}

// -- /pokemon/{id} ---------------------------------------------------------

#[derive(Debug, Deserialize, Clone)]
pub struct PokemonPayload {
    pub name: String,
    #[serde(default)]
    pub base_experience: Option<u32>,
    pub height: u32,
    pub weight: u32,
    pub species: NamedResource,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub moves: Vec<MoveEntry>,
}

impl PokemonPayload {
    /// Base stat by API stat name (e.g., "special-attack"). Missing stats read as 0.
    pub fn base_stat(&self, name: &str) -> u32 {
        self.stats
            .iter()
            .find(|s| s.stat.name == name)
            .map(|s| s.base_stat)
            .unwrap_or(0)
    }

    /// Type names in slot order.
    pub fn type_names(&self) -> Vec<&str> {
        let mut slots: Vec<&TypeSlot> = self.types.iter().collect();
        slots.sort_by_key(|t| t.slot);
        slots.into_iter().map(|t| t.kind.name.as_str()).collect()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TypeSlot {
    #[serde(default)]
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StatEntry {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AbilitySlot {
    pub ability: NamedResource,
    #[serde(default)]
    pub is_hidden: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MoveEntry {
    #[serde(rename = "move")]
    pub move_ref: NamedResource,
    #[serde(default)]
    pub version_group_details: Vec<VersionGroupDetail>,
}

/// How a move is learned in one version group.
#[derive(Debug, Deserialize, Clone)]
pub struct VersionGroupDetail {
    #[serde(default)]
    pub level_learned_at: u32,
    pub move_learn_method: NamedResource,
}

// -- /pokemon-species/{id} -------------------------------------------------

#[derive(Debug, Deserialize, Clone)]
pub struct SpeciesPayload {
    /// Chance of being female in eighths, or -1 for genderless
    pub gender_rate: i32,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
    #[serde(default)]
    pub evolution_chain: Option<ApiResource>,
}

impl SpeciesPayload {
    /// First flavor text entry in the given language.
    pub fn flavor_text(&self, language: &str) -> Option<&str> {
        self.flavor_text_entries
            .iter()
            .find(|e| e.language.name == language)
            .map(|e| e.flavor_text.as_str())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    pub language: NamedResource,
}

// -- /ability/{id} ---------------------------------------------------------

#[derive(Debug, Deserialize, Clone)]
pub struct AbilityPayload {
    #[serde(default)]
    pub effect_entries: Vec<EffectEntry>,
}

impl AbilityPayload {
    /// First short effect in the given language.
    pub fn short_effect(&self, language: &str) -> Option<&str> {
        self.effect_entries
            .iter()
            .find(|e| e.language.name == language)
            .map(|e| e.short_effect.as_str())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct EffectEntry {
    #[serde(default)]
    pub short_effect: String,
    pub language: NamedResource,
}

// -- /evolution-chain/{id} -------------------------------------------------

#[derive(Debug, Deserialize, Clone)]
pub struct EvolutionChainPayload {
    pub chain: ChainLink,
}

/// One node of an evolution chain as the API nests it.
#[derive(Debug, Deserialize, Clone)]
pub struct ChainLink {
    pub species: NamedResource,
    /// Conditions for evolving *into* this species; empty at the chain root
    #[serde(default)]
    pub evolution_details: Vec<EvolutionDetail>,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EvolutionDetail {
    #[serde(default)]
    pub min_level: Option<u32>,
}

// -- /pokemon/{id}/encounters ----------------------------------------------

#[derive(Debug, Deserialize, Clone)]
pub struct EncounterEntry {
    pub location_area: NamedResource,
    #[serde(default)]
    pub version_details: Vec<VersionEncounterDetail>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VersionEncounterDetail {
    pub version: NamedResource,
}
