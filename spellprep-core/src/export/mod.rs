//! Export of prepared spells to a printable document.
//!
//! Export happens in two steps:
//! - [`build_document`] shapes the selected spells into a [`Document`]
//! - a [`RenderBackend`] turns that document plus a [`FormatConfig`] into
//!   file bytes, and [`save_export`] writes them out
//!
//! # Example
//!
//! ```
//! use spellprep_core::export::{build_document, ExportLayout, FormatConfig, HtmlBackend, RenderBackend};
//! use spellprep_core::testing::three_spell_catalog;
//!
//! let catalog = three_spell_catalog();
//! let spells: Vec<_> = catalog.iter().collect();
//! let document = build_document(&spells, ExportLayout::List)?;
//! let bytes = HtmlBackend::new().render(&document, &FormatConfig::for_layout(ExportLayout::List))?;
//! assert!(!bytes.is_empty());
//! # Ok::<(), spellprep_core::export::ExportError>(())
//! ```

mod document;
mod html;

pub use document::{Attribute, Block, Card, CardRow, Document, ExportLayout, SpellBlock};
pub use html::{escape_xml, HtmlBackend};

use crate::catalog::Catalog;
use crate::selection::SelectionStore;
use crate::spells::SpellRecord;
use crate::stats::group_by_level;
use crate::text::{DOCUMENT_TITLE, NOTHING_SELECTED};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Errors from export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{}", NOTHING_SELECTED)]
    NothingSelected,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Render error: {0}")]
    Render(#[from] std::fmt::Error),
}

/// Page size of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PageSize {
    #[default]
    A4,
}

impl PageSize {
    /// Width and height in millimetres, portrait.
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0, 297.0),
        }
    }

    pub fn css_name(&self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Page margins in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 8.0,
            right: 10.0,
            bottom: 8.0,
            left: 10.0,
        }
    }
}

/// Raster settings for embedded imagery.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImageSettings {
    pub format: ImageFormat,
    /// 0.0 to 1.0
    pub quality: f32,
    /// Render scale factor for rasterized content.
    pub scale: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            format: ImageFormat::Jpeg,
            quality: 0.98,
            scale: 2,
        }
    }
}

/// Page-break strategies understood by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BreakMode {
    AvoidAll,
    Css,
    Legacy,
}

/// Which element class must not be split across pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BreakAvoid {
    SpellBlock,
    CardRow,
}

impl BreakAvoid {
    pub fn class_name(&self) -> &'static str {
        match self {
            BreakAvoid::SpellBlock => "spell-block",
            BreakAvoid::CardRow => "card-row",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageBreakRules {
    pub modes: Vec<BreakMode>,
    pub avoid: BreakAvoid,
}

/// Output format configuration handed to the backend with the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormatConfig {
    pub file_name: String,
    pub page_size: PageSize,
    pub orientation: Orientation,
    pub margins: Margins,
    pub image: ImageSettings,
    pub page_break: PageBreakRules,
}

impl FormatConfig {
    /// Standard configuration for a layout.
    pub fn for_layout(layout: ExportLayout) -> Self {
        let avoid = match layout {
            ExportLayout::List => BreakAvoid::SpellBlock,
            ExportLayout::Cards => BreakAvoid::CardRow,
        };
        Self {
            file_name: layout.file_name().to_string(),
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            margins: Margins::default(),
            image: ImageSettings::default(),
            page_break: PageBreakRules {
                modes: vec![BreakMode::AvoidAll, BreakMode::Css, BreakMode::Legacy],
                avoid,
            },
        }
    }
}

/// Converts a document into the bytes of an output file.
pub trait RenderBackend {
    /// Extension of the files this backend produces, without the dot.
    fn file_extension(&self) -> &'static str;

    /// Render the document.
    fn render(&self, document: &Document, config: &FormatConfig) -> Result<Vec<u8>, ExportError>;
}

/// Spells in an exported state, in catalog order.
///
/// Prepared and always-prepared are both exported; cantrips are included.
pub fn exported_spells<'a>(selection: &SelectionStore, catalog: &'a Catalog) -> Vec<&'a SpellRecord> {
    catalog
        .iter()
        .filter(|spell| selection.state(spell.id).is_exported())
        .collect()
}

/// Shape the given spells into a document for the chosen layout.
pub fn build_document(spells: &[&SpellRecord], layout: ExportLayout) -> Result<Document, ExportError> {
    if spells.is_empty() {
        return Err(ExportError::NothingSelected);
    }

    let body = match layout {
        ExportLayout::List => list_body(spells),
        ExportLayout::Cards => card_body(spells),
    };

    Ok(Document {
        title: DOCUMENT_TITLE.to_string(),
        layout,
        body,
    })
}

fn list_body(spells: &[&SpellRecord]) -> Vec<Block> {
    let mut body = Vec::new();
    for (level, group) in group_by_level(spells.iter().copied()) {
        body.push(Block::heading(level));
        body.extend(
            group
                .into_iter()
                .map(|spell| Block::Spell(SpellBlock::from_spell(spell))),
        );
    }
    body
}

fn card_body(spells: &[&SpellRecord]) -> Vec<Block> {
    spells
        .chunks(2)
        .map(|pair| {
            Block::CardRow(CardRow {
                left: Card::from_spell(pair[0]),
                right: pair.get(1).map(|spell| Card::from_spell(spell)),
                keep_together: true,
            })
        })
        .collect()
}

/// Render a document and write it into `dir`.
///
/// The file name comes from the config, with the extension replaced by the
/// backend's. Returns the path written.
pub async fn save_export(
    backend: &(dyn RenderBackend + Sync),
    document: &Document,
    config: &FormatConfig,
    dir: impl AsRef<Path>,
) -> Result<PathBuf, ExportError> {
    let bytes = backend.render(document, config)?;
    let path = dir
        .as_ref()
        .join(&config.file_name)
        .with_extension(backend.file_extension());
    fs::write(&path, bytes).await?;
    tracing::info!(path = %path.display(), spells = document.spell_count(), "export written");
    Ok(path)
}
