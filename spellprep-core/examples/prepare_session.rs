//! Walk through a preparation session over the embedded catalogs

use spellprep_core::export::{save_export, HtmlBackend};
use spellprep_core::{CatalogVersion, ExportLayout, PrepSession, SessionConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Spell preparation walkthrough ===\n");

    // 1. Create a session
    println!("1. Loading catalogs...");
    let config = SessionConfig::new()
        .with_version(CatalogVersion::Phb2024)
        .with_layout(ExportLayout::Cards)
        .with_export_dir(std::env::temp_dir());
    let mut session = PrepSession::new(config).await?;
    println!("   {} spells in {}", session.catalog().len(), session.version().label());

    // 2. Filter to cleric spells up to 3rd level
    println!("\n2. Filtering...");
    session.set_class(Some("Жрец".to_string()));
    session.set_max_level(3);
    for (level, spells) in session.visible_groups() {
        let names: Vec<_> = spells.iter().map(|s| s.name.as_str()).collect();
        println!("   {level}: {}", names.join(", "));
    }

    // 3. Prepare everything visible, marking the first levelled spell as always prepared
    println!("\n3. Preparing...");
    let ids: Vec<_> = session.visible_spells().iter().map(|s| s.id).collect();
    for id in &ids {
        session.toggle(*id)?;
    }
    if let Some(spell) = session.visible_spells().into_iter().find(|s| !s.is_cantrip()) {
        let id = spell.id;
        session.toggle(id)?;
    }
    let stats = session.statistics();
    println!("   {}", session.prepared_header());
    println!(
        "   prepared {}, always {}, total {}",
        stats.total_prepared,
        stats.total_always_prepared,
        stats.grand_total()
    );

    // 4. Export
    println!("\n4. Exporting...");
    let (document, format) = session.prepare_export()?;
    let path = save_export(&HtmlBackend::new(), &document, &format, session.export_dir()).await?;
    println!("   {} card rows written to {}", document.card_rows().count(), path.display());

    Ok(())
}
