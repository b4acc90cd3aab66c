//! Spell preparation engine.
//!
//! This crate provides:
//! - Versioned, immutable spell catalogs
//! - Per-spell preparation tracking (prepared / always prepared)
//! - Filtering, grouping by level, and preparation statistics
//! - Export of the prepared spells to a printable document
//!
//! # Quick Start
//!
//! ```no_run
//! use spellprep_core::{PrepSession, SessionConfig, SpellId};
//! use spellprep_core::export::{save_export, HtmlBackend};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = PrepSession::new(SessionConfig::new()).await?;
//!
//!     session.set_class(Some("Волшебник".to_string()));
//!     session.toggle(SpellId(4))?;
//!     println!("{}", session.prepared_header());
//!
//!     let (document, config) = session.prepare_export()?;
//!     save_export(&HtmlBackend::new(), &document, &config, session.export_dir()).await?;
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod export;
pub mod filter;
pub mod selection;
pub mod session;
pub mod spells;
pub mod stats;
pub mod testing;
pub mod text;

// Primary public API
pub use catalog::{Catalog, CatalogError, CatalogVersion};
pub use export::{Document, ExportError, ExportLayout, FormatConfig, HtmlBackend, RenderBackend};
pub use filter::FilterCriteria;
pub use selection::{PrepState, SelectionStore};
pub use session::{PrepSession, SessionConfig, SessionError};
pub use spells::{Component, SpellId, SpellRecord};
pub use stats::{LevelCounts, Statistics};
pub use text::pluralize_spells;
