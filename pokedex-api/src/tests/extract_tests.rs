use super::*;
use crate::fixtures::{self, MockFetcher, url};
use crate::types::EncounterEntry;

fn bulbasaur() -> PokemonPayload {
    serde_json::from_value(fixtures::bulbasaur()).unwrap()
}

fn bulbasaur_species() -> SpeciesPayload {
    serde_json::from_value(fixtures::bulbasaur_species()).unwrap()
}

#[test]
fn test_extract_main() {
    let record = extract_main(1, &bulbasaur(), &bulbasaur_species());
    assert_eq!(record.id, "001");
    assert_eq!(record.name, "bulbasaur");
    assert_eq!(
        record.description,
        "A strange seed was planted on its back at birth."
    );
    assert_eq!(record.types, "grass, poison");
    assert_eq!(record.gender, "87.5% male, 12.5% female");
    assert_eq!(record.stats.hp, 45);
    assert_eq!(record.stats.special_attack, 65);
    assert_eq!(record.stats.speed, 45);
    assert_eq!(record.weight, 69);
    assert_eq!(record.height, 7);
    assert_eq!(record.base_experience, Some(64));
}

#[test]
fn test_extract_main_missing_stats_and_description() {
    let mut pokemon = bulbasaur();
    pokemon.stats.retain(|s| s.stat.name != "speed");
    let mut species = bulbasaur_species();
    species.flavor_text_entries.retain(|e| e.language.name != "en");
    species.gender_rate = -1;

    let record = extract_main(1, &pokemon, &species);
    assert_eq!(record.stats.speed, 0);
    assert_eq!(record.description, NO_DESCRIPTION);
    assert_eq!(record.gender, "Genderless");
}

#[test]
fn test_extract_ability_effect_variants() {
    let pokemon = bulbasaur();
    let slot = &pokemon.abilities[1];
    let payload: AbilityPayload =
        serde_json::from_value(fixtures::ability("Boosts Speed in sunshine.")).unwrap();

    let found = extract_ability(1, slot, Some(&payload)).unwrap();
    assert_eq!(found.pokemon_id, "001");
    assert_eq!(found.ability_id, "034");
    assert_eq!(found.name, "chlorophyll");
    assert!(found.hidden);
    assert_eq!(found.short_effect, "Boosts Speed in sunshine.");

    let no_english = AbilityPayload {
        effect_entries: Vec::new(),
    };
    let missing = extract_ability(1, slot, Some(&no_english)).unwrap();
    assert_eq!(missing.short_effect, NO_SHORT_EFFECT);

    let unavailable = extract_ability(1, slot, None).unwrap();
    assert_eq!(unavailable.short_effect, UNKNOWN_EFFECT);
}

#[test]
fn test_extract_moves_one_row_per_detail() {
    let moves = extract_moves(1, &bulbasaur());
    assert_eq!(moves.len(), 5);
    assert_eq!(moves[0].pokemon_id, "001");
    assert_eq!(moves[0].name, "tackle");
    assert_eq!(moves[0].method, "Level-up");
    assert_eq!(moves[0].level, MoveLevel::Level(1));
    assert_eq!(moves[2].level, MoveLevel::Level(3));
    assert_eq!(moves[3].name, "swords-dance");
    assert_eq!(moves[3].method, "Machine");
    assert_eq!(moves[3].level, MoveLevel::NotApplicable);
}

#[test]
fn test_extract_locations() {
    let encounters: Vec<EncounterEntry> =
        serde_json::from_value(fixtures::pidgey_encounters()).unwrap();
    let locations = extract_locations(16, "pidgey", &encounters);
    assert_eq!(locations.len(), 3);
    assert_eq!(locations[0].pokemon_id, "016");
    assert_eq!(locations[0].pokemon, "pidgey");
    assert_eq!(locations[0].location, "Kanto Route 1 Area");
    assert_eq!(locations[0].version, "Red");
    assert_eq!(locations[1].version, "Blue");
    assert_eq!(locations[2].location, "Viridian Forest Area");
    assert_eq!(locations[2].version, "Yellow");
}

#[tokio::test]
async fn test_fetch_locations_404_is_empty() {
    let fetcher = MockFetcher::new().with_status(url("pokemon/16/encounters"), 404);
    let mut warnings = Vec::new();
    let locations = fetch_locations(&fetcher, fixtures::BASE, 16, "pidgey", &mut warnings).await;
    assert!(locations.is_empty());
    assert_eq!(warnings.len(), 1);
}

#[tokio::test]
async fn test_fetch_locations_success() {
    let fetcher =
        MockFetcher::new().with_json(url("pokemon/16/encounters"), fixtures::pidgey_encounters());
    let mut warnings = Vec::new();
    let locations = fetch_locations(&fetcher, fixtures::BASE, 16, "pidgey", &mut warnings).await;
    assert_eq!(locations.len(), 3);
    assert!(warnings.is_empty());
}

#[tokio::test]
async fn test_fetch_abilities_degrades_per_ability() {
    let fetcher = MockFetcher::new()
        .with_json(url("ability/65/"), fixtures::ability("Powers up Grass-type moves."))
        .with_status(url("ability/34/"), 500);
    let mut warnings = Vec::new();
    let abilities = fetch_abilities(&fetcher, 1, &bulbasaur(), &mut warnings).await;

    assert_eq!(abilities.len(), 2);
    assert_eq!(abilities[0].ability_id, "065");
    assert_eq!(abilities[0].short_effect, "Powers up Grass-type moves.");
    assert!(!abilities[0].hidden);
    assert_eq!(abilities[1].short_effect, UNKNOWN_EFFECT);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("chlorophyll"));
}

#[tokio::test]
async fn test_fetch_abilities_skips_unparseable_id() {
    let mut pokemon = bulbasaur();
    pokemon.abilities[0].ability.url = "https://pokeapi.test/api/v2/ability/overgrow/".to_string();
    let fetcher = MockFetcher::new().with_json(url("ability/34/"), fixtures::ability("Sunny."));
    let mut warnings = Vec::new();
    let abilities = fetch_abilities(&fetcher, 1, &pokemon, &mut warnings).await;

    assert_eq!(abilities.len(), 1);
    assert_eq!(abilities[0].name, "chlorophyll");
    assert!(warnings.iter().any(|w| w.contains("overgrow") && w.contains("skipped")));
}
