//! PrepSession - the primary public API for spell preparation.
//!
//! This module ties the catalogs, the selection store, the filter criteria
//! and the export formatter together behind one interface. All reads reflect
//! every mutation made before them.

use crate::catalog::{Catalog, CatalogError, CatalogVersion};
use crate::export::{build_document, exported_spells, Document, ExportError, ExportLayout, FormatConfig};
use crate::filter::{available_spells, visible_spells, FilterCriteria, MAX_SPELL_LEVEL};
use crate::selection::{PrepState, SelectionStore};
use crate::spells::{SpellId, SpellRecord};
use crate::stats::{aggregate_statistics, group_by_level, Statistics};
use crate::text::prepared_header;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors from PrepSession operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("No spell with id {0} in the active catalog")]
    UnknownSpell(SpellId),

    #[error("No catalog loaded for version {0}")]
    MissingCatalog(CatalogVersion),
}

/// Configuration for creating a new session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Catalog version active at startup.
    pub catalog_version: CatalogVersion,

    /// Initial export layout.
    pub layout: ExportLayout,

    /// Directory export files are written to.
    pub export_dir: PathBuf,

    /// Catalog files replacing the embedded data for a version.
    pub catalog_files: HashMap<CatalogVersion, PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            catalog_version: CatalogVersion::default(),
            layout: ExportLayout::default(),
            export_dir: PathBuf::from("."),
            catalog_files: HashMap::new(),
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the catalog version active at startup.
    pub fn with_version(mut self, version: CatalogVersion) -> Self {
        self.catalog_version = version;
        self
    }

    /// Set the initial export layout.
    pub fn with_layout(mut self, layout: ExportLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the export directory.
    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    /// Load a version's catalog from a JSON file instead of the embedded data.
    pub fn with_catalog_file(mut self, version: CatalogVersion, path: impl Into<PathBuf>) -> Self {
        self.catalog_files.insert(version, path.into());
        self
    }
}

/// A spell preparation session.
pub struct PrepSession {
    catalogs: HashMap<CatalogVersion, Arc<Catalog>>,
    version: CatalogVersion,
    active: Arc<Catalog>,
    selection: SelectionStore,
    criteria: FilterCriteria,
    layout: ExportLayout,
    export_dir: PathBuf,
}

impl PrepSession {
    /// Create a session, loading every catalog version up front.
    pub async fn new(config: SessionConfig) -> Result<Self, SessionError> {
        let mut catalogs = HashMap::new();
        for version in CatalogVersion::ALL {
            let catalog = match config.catalog_files.get(&version) {
                Some(path) => {
                    tracing::info!(%version, path = %path.display(), "loading catalog file");
                    Arc::new(Catalog::load(path).await?)
                }
                None => Catalog::builtin(version)?,
            };
            tracing::debug!(%version, spells = catalog.len(), "catalog ready");
            catalogs.insert(version, catalog);
        }
        Self::from_catalogs(config, catalogs)
    }

    /// Create a session over already-loaded catalogs.
    pub fn from_catalogs(
        config: SessionConfig,
        catalogs: HashMap<CatalogVersion, Arc<Catalog>>,
    ) -> Result<Self, SessionError> {
        let active = catalogs
            .get(&config.catalog_version)
            .cloned()
            .ok_or(SessionError::MissingCatalog(config.catalog_version))?;
        Ok(Self {
            catalogs,
            version: config.catalog_version,
            active,
            selection: SelectionStore::new(),
            criteria: FilterCriteria::default(),
            layout: config.layout,
            export_dir: config.export_dir,
        })
    }

    /// Create a session with a single catalog registered under the default version.
    pub fn with_catalog(catalog: Catalog) -> Self {
        let version = CatalogVersion::default();
        let active = Arc::new(catalog);
        Self {
            catalogs: HashMap::from([(version, Arc::clone(&active))]),
            version,
            active,
            selection: SelectionStore::new(),
            criteria: FilterCriteria::default(),
            layout: ExportLayout::default(),
            export_dir: PathBuf::from("."),
        }
    }

    pub fn version(&self) -> CatalogVersion {
        self.version
    }

    /// The active catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.active
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn layout(&self) -> ExportLayout {
        self.layout
    }

    pub fn export_dir(&self) -> &PathBuf {
        &self.export_dir
    }

    // ---- selection -------------------------------------------------------

    /// Advance a spell's preparation state one step.
    pub fn toggle(&mut self, id: SpellId) -> Result<PrepState, SessionError> {
        if self.catalog().get(id).is_none() {
            return Err(SessionError::UnknownSpell(id));
        }
        let state = self.selection.toggle(id);
        tracing::debug!(%id, ?state, "toggled spell");
        Ok(state)
    }

    pub fn state(&self, id: SpellId) -> PrepState {
        self.selection.state(id)
    }

    /// Make another catalog version active. Clears the selection when the
    /// version actually changes, since ids are not comparable across versions.
    pub fn switch_version(&mut self, version: CatalogVersion) -> Result<(), SessionError> {
        if version == self.version {
            return Ok(());
        }
        let catalog = self
            .catalogs
            .get(&version)
            .cloned()
            .ok_or(SessionError::MissingCatalog(version))?;
        let cleared = self.selection.len();
        self.version = version;
        self.active = catalog;
        self.selection.reset_all();
        tracing::info!(%version, cleared, "switched catalog version");
        Ok(())
    }

    /// Clear all preparation marks.
    pub fn reset_selection(&mut self) {
        self.selection.reset_all();
    }

    // ---- filters ---------------------------------------------------------

    pub fn set_class(&mut self, class: Option<String>) {
        self.criteria.selected_class = class.filter(|c| !c.is_empty());
    }

    /// Step through "all classes" followed by each class in sorted order.
    pub fn cycle_class(&mut self, forward: bool) {
        let classes = self.all_classes();
        if classes.is_empty() {
            self.criteria.selected_class = None;
            return;
        }
        // Position 0 is "all classes"; position i + 1 is classes[i].
        let slots = classes.len() + 1;
        let current = self
            .criteria
            .selected_class
            .as_ref()
            .and_then(|c| classes.iter().position(|x| x == c))
            .map_or(0, |i| i + 1);
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };
        self.criteria.selected_class = next.checked_sub(1).map(|i| classes[i].clone());
    }

    /// Set the inclusive level ceiling, capped at the highest spell level.
    pub fn set_max_level(&mut self, level: u8) {
        self.criteria.max_level = level.min(MAX_SPELL_LEVEL);
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.criteria.search_query = query.into();
    }

    pub fn set_level_filter(&mut self, level: Option<u8>) {
        self.criteria.level_filter = level;
    }

    pub fn set_layout(&mut self, layout: ExportLayout) {
        self.layout = layout;
    }

    pub fn toggle_layout(&mut self) -> ExportLayout {
        self.layout = self.layout.toggled();
        self.layout
    }

    // ---- derived views ---------------------------------------------------

    /// Sorted class names of the active catalog.
    pub fn all_classes(&self) -> Vec<String> {
        self.catalog().all_classes()
    }

    /// Spells passing the class and max-level filters.
    pub fn available_spells(&self) -> Vec<&SpellRecord> {
        available_spells(self.catalog(), &self.criteria)
    }

    /// Spells passing every filter, in catalog order.
    pub fn visible_spells(&self) -> Vec<&SpellRecord> {
        visible_spells(self.catalog(), &self.criteria)
    }

    /// Visible spells grouped by level, cantrips first.
    pub fn visible_groups(&self) -> BTreeMap<u8, Vec<&SpellRecord>> {
        group_by_level(self.visible_spells())
    }

    pub fn statistics(&self) -> Statistics {
        aggregate_statistics(&self.selection, self.catalog())
    }

    /// Number of spells in any prepared state, cantrips included.
    pub fn prepared_count(&self) -> usize {
        self.selection.len()
    }

    pub fn prepared_header(&self) -> String {
        prepared_header(self.prepared_count())
    }

    // ---- export ----------------------------------------------------------

    /// Spells that an export would include, in catalog order.
    pub fn exported_spells(&self) -> Vec<&SpellRecord> {
        exported_spells(&self.selection, self.catalog())
    }

    /// Build the export document and its format configuration.
    ///
    /// Fails with [`ExportError::NothingSelected`] without touching any state
    /// when no spell is prepared.
    pub fn prepare_export(&self) -> Result<(Document, FormatConfig), ExportError> {
        let spells = self.exported_spells();
        let document = build_document(&spells, self.layout)?;
        tracing::debug!(layout = ?self.layout, spells = spells.len(), "export document built");
        Ok((document, FormatConfig::for_layout(self.layout)))
    }
}
