//! QA tests for the preparation flow through the session API.
//!
//! These tests drive a `PrepSession` the way the UI does: filter, toggle,
//! read statistics, switch catalog versions.
//! Run with: `cargo test -p spellprep-core --test qa_preparation_flow -- --nocapture`

use spellprep_core::testing::three_spell_catalog;
use spellprep_core::{
    CatalogVersion, ExportError, ExportLayout, LevelCounts, PrepSession, PrepState, SessionConfig,
    SpellId,
};

async fn builtin_session() -> PrepSession {
    PrepSession::new(SessionConfig::new())
        .await
        .expect("Failed to create session over embedded catalogs")
}

// =============================================================================
// TEST 1: Canonical three-spell scenario
// =============================================================================

#[test]
fn test_three_spell_scenario() {
    let mut session = PrepSession::with_catalog(three_spell_catalog());

    // id=2 -> Prepared
    session.toggle(SpellId(2)).unwrap();
    // id=3 -> AlwaysPrepared
    session.toggle(SpellId(3)).unwrap();
    session.toggle(SpellId(3)).unwrap();
    // id=1 (cantrip) -> Prepared
    session.toggle(SpellId(1)).unwrap();

    assert_eq!(session.state(SpellId(3)), PrepState::AlwaysPrepared);

    let stats = session.statistics();
    println!("Statistics: {:?}", stats);
    assert_eq!(stats.total_prepared, 1, "cantrip must not count");
    assert_eq!(stats.total_always_prepared, 1);
    assert_eq!(stats.grand_total(), 2);
    assert_eq!(
        stats.per_level.get(&0),
        Some(&LevelCounts {
            prepared: 1,
            always_prepared: 0
        })
    );

    // Header counts everything selected, cantrips included
    assert_eq!(session.prepared_header(), "Подготовлено: 3 заклинания");

    // Export includes the cantrip even though totals exclude it
    let (document, _) = session.prepare_export().unwrap();
    assert_eq!(document.headings().collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(document.spell_count(), 3);
}

// =============================================================================
// TEST 2: Toggle cycle returns to the start
// =============================================================================

#[test]
fn test_toggle_cycle_through_session() {
    let mut session = PrepSession::with_catalog(three_spell_catalog());
    let states: Vec<_> = (0..3).map(|_| session.toggle(SpellId(2)).unwrap()).collect();
    assert_eq!(
        states,
        vec![
            PrepState::Prepared,
            PrepState::AlwaysPrepared,
            PrepState::NotPrepared
        ]
    );
    assert!(session.selection().is_empty());
    assert!(session.statistics().is_empty());
}

// =============================================================================
// TEST 3: Embedded catalogs and version switching
// =============================================================================

#[tokio::test]
async fn test_version_switch_clears_selection() {
    let mut session = builtin_session().await;
    assert_eq!(session.version(), CatalogVersion::Phb2024);

    let first_levelled: Vec<SpellId> = session
        .catalog()
        .iter()
        .filter(|s| !s.is_cantrip())
        .take(3)
        .map(|s| s.id)
        .collect();
    for id in &first_levelled {
        session.toggle(*id).unwrap();
    }
    assert_eq!(session.statistics().grand_total(), 3);

    session.switch_version(CatalogVersion::Phb2014).unwrap();
    println!("Switched to {}", session.version().label());

    assert_eq!(session.statistics().grand_total(), 0);
    assert_eq!(session.prepared_count(), 0);
    assert!(matches!(
        session.prepare_export(),
        Err(ExportError::NothingSelected)
    ));
}

#[tokio::test]
async fn test_builtin_filters() {
    let mut session = builtin_session().await;
    let classes = session.all_classes();
    println!("Classes: {:?}", classes);
    assert!(classes.contains(&"Жрец".to_string()));

    session.set_class(Some("Жрец".to_string()));
    session.set_max_level(1);
    let visible = session.visible_spells();
    assert!(!visible.is_empty());
    for spell in &visible {
        assert!(spell.has_class("Жрец"));
        assert!(spell.level <= 1);
    }

    session.set_level_filter(Some(0));
    assert!(session.visible_spells().iter().all(|s| s.is_cantrip()));

    session.set_level_filter(None);
    session.set_search("ЛЕЧЕНИЕ");
    let names: Vec<_> = session.visible_spells().iter().map(|s| s.name.clone()).collect();
    assert_eq!(names, vec!["Лечение ран"]);
}

// =============================================================================
// TEST 4: Catalog file override
// =============================================================================

#[tokio::test]
async fn test_catalog_file_override() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("custom.json");
    std::fs::write(
        &path,
        r#"[{"id": 1, "name": "Тестовое", "level": 2, "classes": ["Бард"],
            "school": "Иллюзия", "casting_time": "Действие", "range": "На себя",
            "components": ["S"], "duration": "Мгновенная", "description": "—"}]"#,
    )
    .unwrap();

    let config = SessionConfig::new()
        .with_version(CatalogVersion::Phb2014)
        .with_catalog_file(CatalogVersion::Phb2014, &path)
        .with_layout(ExportLayout::Cards);
    let session = PrepSession::new(config).await.expect("Failed to load override");

    assert_eq!(session.catalog().len(), 1);
    assert_eq!(session.all_classes(), vec!["Бард"]);
    assert_eq!(session.layout(), ExportLayout::Cards);
}

#[tokio::test]
async fn test_missing_catalog_file_is_error() {
    let config = SessionConfig::new()
        .with_catalog_file(CatalogVersion::Phb2024, "/definitely/not/here.json");
    assert!(PrepSession::new(config).await.is_err());
}
