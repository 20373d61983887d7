//! Payload -> record transforms for the Pokemon, Abilities, Locations and
//! Moves tables.
//!
//! The `extract_*` functions are pure. The `fetch_*` functions wrap the
//! secondary lookups those tables need, and degrade to placeholders or empty
//! lists instead of failing: a missing ability effect or encounter list
//! never costs the Pokémon its row.

use pokedex_core::format::{
    capitalize, clean_flavor_text, format_id, gender_description, location_name,
};
use pokedex_core::{AbilityRecord, BaseStats, LocationRecord, MoveLevel, MoveRecord, PokemonRecord};

use crate::client::{Fetch, encounters_url, fetch_typed};
use crate::error::ApiError;
use crate::types::{AbilityPayload, AbilitySlot, EncounterEntry, PokemonPayload, SpeciesPayload};

/// Language used for descriptions and effects.
pub const LANGUAGE: &str = "en";

pub const NO_DESCRIPTION: &str = "No description available";
pub const NO_SHORT_EFFECT: &str = "No short effect available";
/// Effect text when the ability lookup itself failed.
pub const UNKNOWN_EFFECT: &str = "Unknown";

const LEVEL_UP_METHOD: &str = "level-up";

/// Build the Pokemon sheet row from the main and species payloads.
pub fn extract_main(id: u32, pokemon: &PokemonPayload, species: &SpeciesPayload) -> PokemonRecord {
    let description = species
        .flavor_text(LANGUAGE)
        .map(clean_flavor_text)
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    PokemonRecord {
        id: format_id(id),
        name: pokemon.name.clone(),
        description,
        types: pokemon.type_names().join(", "),
        gender: gender_description(species.gender_rate),
        stats: BaseStats {
            hp: pokemon.base_stat("hp"),
            attack: pokemon.base_stat("attack"),
            defense: pokemon.base_stat("defense"),
            special_attack: pokemon.base_stat("special-attack"),
            special_defense: pokemon.base_stat("special-defense"),
            speed: pokemon.base_stat("speed"),
        },
        weight: pokemon.weight,
        height: pokemon.height,
        base_experience: pokemon.base_experience,
    }
}

/// Build one Abilities row.
///
/// `effect` is the ability's own payload, or `None` when that lookup failed,
/// in which case the effect reads [`UNKNOWN_EFFECT`].
pub fn extract_ability(
    pokemon_id: u32,
    slot: &AbilitySlot,
    effect: Option<&AbilityPayload>,
) -> Result<AbilityRecord, ApiError> {
    let ability_id = slot.ability.id()?;
    let short_effect = match effect {
        Some(payload) => payload
            .short_effect(LANGUAGE)
            .unwrap_or(NO_SHORT_EFFECT)
            .to_string(),
        None => UNKNOWN_EFFECT.to_string(),
    };

    Ok(AbilityRecord {
        pokemon_id: format_id(pokemon_id),
        ability_id: format_id(ability_id),
        name: slot.ability.name.clone(),
        hidden: slot.is_hidden,
        short_effect,
    })
}

/// One Locations row per (location area, game version) pair.
pub fn extract_locations(
    pokemon_id: u32,
    pokemon_name: &str,
    encounters: &[EncounterEntry],
) -> Vec<LocationRecord> {
    let id = format_id(pokemon_id);
    encounters
        .iter()
        .flat_map(|encounter| {
            let location = location_name(&encounter.location_area.name);
            let id = &id;
            encounter
                .version_details
                .iter()
                .map(move |detail| LocationRecord {
                    pokemon_id: id.clone(),
                    pokemon: pokemon_name.to_string(),
                    location: location.clone(),
                    version: capitalize(&detail.version.name),
                })
        })
        .collect()
}

/// One Moves row per version-group detail. Duplicates across version groups
/// are kept here and collapsed when the tables are assembled.
pub fn extract_moves(pokemon_id: u32, pokemon: &PokemonPayload) -> Vec<MoveRecord> {
    let id = format_id(pokemon_id);
    let mut moves = Vec::new();
    for entry in &pokemon.moves {
        for detail in &entry.version_group_details {
            let method = &detail.move_learn_method.name;
            let level = if method == LEVEL_UP_METHOD {
                MoveLevel::Level(detail.level_learned_at)
            } else {
                MoveLevel::NotApplicable
            };
            moves.push(MoveRecord {
                pokemon_id: id.clone(),
                name: entry.move_ref.name.clone(),
                method: capitalize(method),
                level,
            });
        }
    }
    moves
}

/// Look up every ability's effect text and build the Abilities rows.
///
/// A failed effect lookup degrades that row's effect to [`UNKNOWN_EFFECT`];
/// an ability whose URL carries no ID is left out. Both are noted in
/// `warnings`.
pub async fn fetch_abilities<F: Fetch>(
    fetcher: &F,
    pokemon_id: u32,
    pokemon: &PokemonPayload,
    warnings: &mut Vec<String>,
) -> Vec<AbilityRecord> {
    let mut records = Vec::with_capacity(pokemon.abilities.len());
    for slot in &pokemon.abilities {
        let effect = match fetch_typed::<_, AbilityPayload>(fetcher, &slot.ability.url).await {
            Ok(payload) => Some(payload),
            Err(e) => {
                log::debug!("Ability effect lookup failed for '{}': {e}", slot.ability.name);
                warnings.push(format!("Ability '{}' effect unavailable: {e}", slot.ability.name));
                None
            }
        };
        match extract_ability(pokemon_id, slot, effect.as_ref()) {
            Ok(record) => records.push(record),
            Err(e) => warnings.push(format!("Ability '{}' skipped: {e}", slot.ability.name)),
        }
    }
    records
}

/// Fetch the encounter list for a Pokémon and build its Locations rows.
///
/// Any failure (including a 404) yields an empty list.
pub async fn fetch_locations<F: Fetch>(
    fetcher: &F,
    base_url: &str,
    pokemon_id: u32,
    pokemon_name: &str,
    warnings: &mut Vec<String>,
) -> Vec<LocationRecord> {
    let url = encounters_url(base_url, pokemon_id);
    match fetch_typed::<_, Vec<EncounterEntry>>(fetcher, &url).await {
        Ok(encounters) => extract_locations(pokemon_id, pokemon_name, &encounters),
        Err(e) => {
            log::debug!("Encounter lookup failed for #{pokemon_id}: {e}");
            warnings.push(format!("Encounters unavailable: {e}"));
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "tests/extract_tests.rs"]
mod tests;
