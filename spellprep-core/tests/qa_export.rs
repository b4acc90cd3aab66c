//! QA tests for export: document shaping and the file hand-off.
//!
//! Run with: `cargo test -p spellprep-core --test qa_export -- --nocapture`

use spellprep_core::export::{save_export, Block, ExportLayout, HtmlBackend};
use spellprep_core::testing::{three_spell_catalog, SpellBuilder};
use spellprep_core::{Catalog, PrepSession, SpellId};
use tempfile::TempDir;

fn session_with_all_prepared() -> PrepSession {
    let mut session = PrepSession::with_catalog(three_spell_catalog());
    for id in 1..=3 {
        session.toggle(SpellId(id)).unwrap();
    }
    session
}

// =============================================================================
// TEST 1: List export written to disk
// =============================================================================

#[tokio::test]
async fn test_list_export_written() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let session = session_with_all_prepared();

    let (document, config) = session.prepare_export().unwrap();
    let path = save_export(&HtmlBackend::new(), &document, &config, temp_dir.path())
        .await
        .expect("Failed to save export");

    println!("Export written to: {:?}", path);
    assert!(path.exists());
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "podgotovlennye-zaklinaniya.html"
    );

    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("<h1>Подготовленные заклинания</h1>"));
    assert!(html.contains("<h2>Заговоры</h2>"));
    assert!(html.contains("Волшебная стрела"));
}

// =============================================================================
// TEST 2: Cards export has distinct name and placeholder
// =============================================================================

#[tokio::test]
async fn test_cards_export_written() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let mut session = session_with_all_prepared();
    session.set_layout(ExportLayout::Cards);

    let (document, config) = session.prepare_export().unwrap();
    let rows: Vec<_> = document.card_rows().collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[1].right.is_none());

    let path = save_export(&HtmlBackend::new(), &document, &config, temp_dir.path())
        .await
        .unwrap();
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "podgotovlennye-zaklinaniya-kartochki.html"
    );

    let html = std::fs::read_to_string(&path).unwrap();
    assert_eq!(html.matches("card card-empty").count(), 1);
}

// =============================================================================
// TEST 3: Export order and grouping
// =============================================================================

#[test]
fn test_list_export_sections_in_level_order() {
    let catalog = Catalog::new(vec![
        SpellBuilder::new(10, "Огненный шар", 3).build(),
        SpellBuilder::new(11, "Свет", 0).build(),
        SpellBuilder::new(12, "Щит", 1).build(),
        SpellBuilder::new(13, "Полёт", 3).build(),
    ]);
    let mut session = PrepSession::with_catalog(catalog);
    for id in 10..=13 {
        session.toggle(SpellId(id)).unwrap();
    }
    // Always-prepared spells export the same as prepared ones
    session.toggle(SpellId(13)).unwrap();

    let (document, _) = session.prepare_export().unwrap();
    let order: Vec<String> = document
        .body
        .iter()
        .map(|block| match block {
            Block::LevelHeading { title, .. } => format!("# {title}"),
            Block::Spell(spell) => spell.name.clone(),
            Block::CardRow(_) => unreachable!("list layout has no card rows"),
        })
        .collect();

    assert_eq!(
        order,
        vec![
            "# Заговоры",
            "Свет",
            "# 1 уровень",
            "Щит",
            "# 3 уровень",
            "Огненный шар",
            "Полёт"
        ]
    );
}

#[tokio::test]
async fn test_export_to_missing_directory_fails() {
    let session = session_with_all_prepared();
    let (document, config) = session.prepare_export().unwrap();
    let result = save_export(
        &HtmlBackend::new(),
        &document,
        &config,
        "/nonexistent/spellprep/output",
    )
    .await;
    assert!(result.is_err());
}
