use super::*;
use pokedex_core::{
    AbilityRecord, BaseStats, EvolutionLevel, EvolutionRecord, ExportTables, PokemonRecord,
};

fn tables() -> ExportTables {
    let mut tables = ExportTables::new();
    tables.pokemon.push(PokemonRecord {
        id: "001".into(),
        name: "bulbasaur".into(),
        description: "A strange seed was planted on its back at birth.".into(),
        types: "grass, poison".into(),
        gender: "87.5% male, 12.5% female".into(),
        stats: BaseStats {
            hp: 45,
            attack: 49,
            defense: 49,
            special_attack: 65,
            special_defense: 65,
            speed: 45,
        },
        weight: 69,
        height: 7,
        base_experience: Some(64),
    });
    tables.abilities.push(AbilityRecord {
        pokemon_id: "001".into(),
        ability_id: "34".into(),
        name: "chlorophyll".into(),
        hidden: true,
        short_effect: "Doubles Speed during strong sunlight.".into(),
    });
    tables.evolutions.push(EvolutionRecord {
        parent: "bulbasaur".into(),
        parent_id: "001".into(),
        child: "ivysaur".into(),
        child_id: "002".into(),
        level: EvolutionLevel::Level(16),
    });
    tables
}

fn is_zip(path: &Path) -> bool {
    std::fs::read(path).map(|b| b.starts_with(b"PK")).unwrap_or(false)
}

/// Read one part of the workbook package as text.
fn read_part(path: &Path, part: &str) -> String {
    use std::io::Read;

    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut entry = archive.by_name(part).unwrap();
    let mut xml = String::new();
    entry.read_to_string(&mut xml).unwrap();
    xml
}

/// The opening `<c ...>` tag of cell `reference` in a worksheet part.
fn cell_tag<'a>(xml: &'a str, reference: &str) -> &'a str {
    let needle = format!("<c r=\"{reference}\"");
    let start = xml
        .find(&needle)
        .unwrap_or_else(|| panic!("cell {reference} not found"));
    let end = start + xml[start..].find('>').unwrap();
    &xml[start..=end]
}

#[test]
fn test_writes_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pokemon_data.xlsx");

    XlsxWriter::new().write(&tables().to_sheets(), &path).unwrap();
    assert!(is_zip(&path));
}

#[test]
fn test_creates_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("nested").join("data.xlsx");

    XlsxWriter::new().write(&ExportTables::new().to_sheets(), &path).unwrap();
    assert!(is_zip(&path));
}

#[test]
fn test_rejects_long_sheet_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.xlsx");
    let sheet = Sheet {
        name: "A sheet name that is far too long for Excel".into(),
        headers: vec!["A".into()],
        rows: vec![],
    };

    let err = XlsxWriter::new().write(&[sheet], &path).unwrap_err();
    assert!(matches!(err, SheetError::InvalidSheet(_)));
    assert!(!path.exists());
}

#[test]
fn test_sheets_in_table_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pokemon_data.xlsx");
    XlsxWriter::new().write(&tables().to_sheets(), &path).unwrap();

    let workbook = read_part(&path, "xl/workbook.xml");
    let positions: Vec<usize> = ["Pokemon", "Abilities", "Locations", "Moves", "Evolutions"]
        .iter()
        .map(|name| {
            workbook
                .find(&format!("name=\"{name}\""))
                .unwrap_or_else(|| panic!("sheet {name} missing"))
        })
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_cells_keep_their_types() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pokemon_data.xlsx");
    XlsxWriter::new().write(&tables().to_sheets(), &path).unwrap();

    // Pokemon: bold string header, string ID, numeric HP in column F
    let pokemon = read_part(&path, "xl/worksheets/sheet1.xml");
    let header = cell_tag(&pokemon, "A1");
    assert!(header.contains("s=\"1\""), "{header}");
    assert!(header.contains("t=\"s\""), "{header}");
    assert!(cell_tag(&pokemon, "A2").contains("t=\"s\""));
    let hp = cell_tag(&pokemon, "F2");
    assert!(!hp.contains("t=\""), "{hp}");
    assert!(pokemon.contains("<v>45</v>"));

    // Abilities: the hidden flag is a boolean cell
    let abilities = read_part(&path, "xl/worksheets/sheet2.xml");
    assert!(cell_tag(&abilities, "D2").contains("t=\"b\""));
    assert!(cell_tag(&abilities, "D1").contains("s=\"1\""));

    // Evolutions: a known level is numeric
    let evolutions = read_part(&path, "xl/worksheets/sheet5.xml");
    assert!(!cell_tag(&evolutions, "E2").contains("t=\""));
}
