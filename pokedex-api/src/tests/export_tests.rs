use super::*;
use crate::fixtures::{self, BASE, MockFetcher, url};
use pokedex_core::{EvolutionLevel, MoveLevel};
use serde_json::json;

fn options(limit: u32, concurrency: usize) -> ExportOptions {
    ExportOptions {
        base_url: BASE.to_string(),
        limit,
        concurrency,
    }
}

async fn run(fetcher: &MockFetcher, options: &ExportOptions) -> (ExportResult, Vec<ExportEvent>) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let result = export_all(fetcher, options, tx).await.unwrap();
    let mut events = Vec::new();
    while let Ok(e) = rx.try_recv() {
        events.push(e);
    }
    (result, events)
}

/// Bulbasaur plus a sibling species (#2) that shares its chain.
fn two_pokemon_fetcher() -> MockFetcher {
    let mut ivysaur = fixtures::bulbasaur();
    ivysaur["id"] = json!(2);
    ivysaur["name"] = json!("ivysaur");
    ivysaur["species"] = fixtures::resource("pokemon-species", "ivysaur", 2);
    ivysaur["abilities"] = json!([]);

    fixtures::bulbasaur_fetcher()
        .with_json(url("pokemon/2"), ivysaur)
        .with_json(url("pokemon-species/2/"), fixtures::bulbasaur_species())
        .with_json(url("pokemon/2/encounters"), fixtures::pidgey_encounters())
}

#[tokio::test]
async fn test_limit_one_end_to_end() {
    let fetcher = fixtures::bulbasaur_fetcher();
    let (result, events) = run(&fetcher, &options(1, 1)).await;
    let tables = &result.tables;

    assert_eq!(tables.pokemon.len(), 1);
    assert_eq!(tables.pokemon[0].id, "001");
    assert!(tables.abilities.iter().all(|a| a.pokemon_id == "001"));
    assert!(tables.moves.iter().all(|m| m.pokemon_id == "001"));
    assert!(tables.locations.is_empty());

    assert_eq!(tables.abilities.len(), 2);
    assert_eq!(
        tables.abilities[0].short_effect,
        "Powers up Grass-type moves in a pinch."
    );

    // tackle level 1 appears in two version groups but only once here
    assert_eq!(tables.moves.len(), 3);
    assert_eq!(tables.moves[0].level, MoveLevel::Level(1));
    assert_eq!(tables.moves[1].level, MoveLevel::Level(3));
    assert_eq!(tables.moves[2].level, MoveLevel::NotApplicable);

    assert_eq!(tables.evolutions.len(), 2);
    assert_eq!(tables.evolutions[0].level, EvolutionLevel::Level(16));

    assert_eq!(result.log.summary().exported, 1);
    assert_eq!(events.first(), Some(&ExportEvent::Started { total: 1 }));
    assert_eq!(events.last(), Some(&ExportEvent::Done));
}

#[tokio::test]
async fn test_main_failure_skips_id_everywhere() {
    let fetcher = two_pokemon_fetcher().with_status(url("pokemon/1"), 500);
    let (result, events) = run(&fetcher, &options(2, 1)).await;

    assert_eq!(result.tables.pokemon.len(), 1);
    assert_eq!(result.tables.pokemon[0].id, "002");
    assert!(result.tables.moves.iter().all(|m| m.pokemon_id == "002"));
    assert!(result.tables.abilities.is_empty());
    assert_eq!(result.log.skipped_ids(), vec![1]);
    assert!(
        events
            .iter()
            .any(|e| matches!(e, ExportEvent::PokemonSkipped { id: 1, .. }))
    );
}

#[tokio::test]
async fn test_species_failure_skips_id() {
    let fetcher = fixtures::bulbasaur_fetcher().with_status(url("pokemon-species/1/"), 404);
    let (result, _) = run(&fetcher, &options(1, 1)).await;

    assert!(result.tables.pokemon.is_empty());
    assert!(result.tables.moves.is_empty());
    assert!(result.tables.evolutions.is_empty());
    match &result.log.entries()[0] {
        LogEntry::Skipped { id, reason } => {
            assert_eq!(*id, 1);
            assert!(reason.contains("Species"));
        }
        other => panic!("expected skip, got {other:?}"),
    }
    // Nothing past the species lookup was attempted
    assert_eq!(
        fetcher.requests(),
        vec![url("pokemon/1"), url("pokemon-species/1/")]
    );
}

#[tokio::test]
async fn test_malformed_main_payload_skips_id() {
    let fetcher = fixtures::bulbasaur_fetcher().with_json(url("pokemon/1"), json!({ "id": 1 }));
    let (result, _) = run(&fetcher, &options(1, 1)).await;
    assert!(result.tables.pokemon.is_empty());
    assert_eq!(result.log.summary().skipped, 1);
}

#[tokio::test]
async fn test_secondary_failures_degrade() {
    let fetcher = fixtures::bulbasaur_fetcher()
        .with_status(url("ability/65/"), 503)
        .with_status(url("pokemon/1/encounters"), 404)
        .with_status(url("evolution-chain/1/"), 404);
    let (result, events) = run(&fetcher, &options(1, 1)).await;

    assert_eq!(result.tables.pokemon.len(), 1);
    assert_eq!(result.tables.abilities.len(), 2);
    assert_eq!(result.tables.abilities[0].short_effect, "Unknown");
    assert!(result.tables.locations.is_empty());
    assert!(result.tables.evolutions.is_empty());

    match &result.log.entries()[0] {
        LogEntry::Degraded { warnings, .. } => assert_eq!(warnings.len(), 3),
        other => panic!("expected degraded, got {other:?}"),
    }
    assert!(events.iter().any(|e| matches!(
        e,
        ExportEvent::PokemonExported {
            id: 1,
            degraded: true,
            ..
        }
    )));
}

#[tokio::test]
async fn test_evolutions_deduplicated_across_ids() {
    let fetcher = two_pokemon_fetcher();
    let (result, _) = run(&fetcher, &options(2, 1)).await;

    // Both species resolve the same chain; edges appear once
    assert_eq!(result.tables.evolutions.len(), 2);
    assert_eq!(result.tables.pokemon.len(), 2);
    assert_eq!(result.tables.locations.len(), 3);
    assert!(result.tables.locations.iter().all(|l| l.pokemon_id == "002"));
    // Moves are unique per Pokémon, not across Pokémon
    assert_eq!(result.tables.moves.len(), 6);
}

#[tokio::test]
async fn test_concurrency_preserves_id_order() {
    let sequential = run(&two_pokemon_fetcher(), &options(3, 1)).await.0;
    let concurrent = run(&two_pokemon_fetcher(), &options(3, 3)).await.0;

    assert_eq!(sequential.tables, concurrent.tables);
    let ids: Vec<&str> = concurrent
        .tables
        .pokemon
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, vec!["001", "002"]);
    assert_eq!(concurrent.log.skipped_ids(), vec![3]);
}

#[tokio::test]
async fn test_invalid_options_rejected() {
    let fetcher = MockFetcher::new();
    let (tx, _rx) = mpsc::unbounded_channel();
    assert!(export_all(&fetcher, &options(0, 1), tx.clone()).await.is_err());
    assert!(
        export_all(&fetcher, &options(MAX_LIMIT + 1, 1), tx.clone())
            .await
            .is_err()
    );
    assert!(export_all(&fetcher, &options(1, 0), tx).await.is_err());
    assert!(fetcher.requests().is_empty());
}
