//! Versioned spell catalogs.
//!
//! Two rule editions ship embedded in the crate. Each is parsed once on first
//! access and shared afterwards; a catalog never changes after it is built.

use crate::spells::{SpellId, SpellRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};
use thiserror::Error;
use tokio::fs;

/// Errors from catalog loading.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Embedded {version} catalog is corrupt: {message}")]
    Embedded {
        version: CatalogVersion,
        message: String,
    },

    #[error("Unknown catalog version: {0}")]
    UnknownVersion(String),
}

/// Rule edition whose spell collection is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CatalogVersion {
    Phb2014,
    #[default]
    Phb2024,
}

impl CatalogVersion {
    pub const ALL: [CatalogVersion; 2] = [CatalogVersion::Phb2014, CatalogVersion::Phb2024];

    pub fn label(&self) -> &'static str {
        match self {
            CatalogVersion::Phb2014 => "Книга игрока 2014",
            CatalogVersion::Phb2024 => "Книга игрока 2024",
        }
    }

    /// The other edition, for a single-key switch in the UI.
    pub fn next(&self) -> Self {
        match self {
            CatalogVersion::Phb2014 => CatalogVersion::Phb2024,
            CatalogVersion::Phb2024 => CatalogVersion::Phb2014,
        }
    }

    fn embedded_json(&self) -> &'static str {
        match self {
            CatalogVersion::Phb2014 => include_str!("../data/spells_2014.json"),
            CatalogVersion::Phb2024 => include_str!("../data/spells_2024.json"),
        }
    }
}

impl fmt::Display for CatalogVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogVersion::Phb2014 => write!(f, "2014"),
            CatalogVersion::Phb2024 => write!(f, "2024"),
        }
    }
}

impl FromStr for CatalogVersion {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "2014" | "phb2014" => Ok(CatalogVersion::Phb2014),
            "2024" | "phb2024" => Ok(CatalogVersion::Phb2024),
            other => Err(CatalogError::UnknownVersion(other.to_string())),
        }
    }
}

/// Immutable, ordered collection of spell records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    spells: Vec<SpellRecord>,
}

static CATALOG_2014: LazyLock<Result<Arc<Catalog>, String>> =
    LazyLock::new(|| parse_embedded(CatalogVersion::Phb2014));
static CATALOG_2024: LazyLock<Result<Arc<Catalog>, String>> =
    LazyLock::new(|| parse_embedded(CatalogVersion::Phb2024));

fn parse_embedded(version: CatalogVersion) -> Result<Arc<Catalog>, String> {
    Catalog::from_json_str(version.embedded_json())
        .map(Arc::new)
        .map_err(|e| e.to_string())
}

impl Catalog {
    /// Build a catalog from records, keeping their order.
    pub fn new(spells: Vec<SpellRecord>) -> Self {
        Self { spells }
    }

    /// The catalog shipped with the crate for a given edition.
    pub fn builtin(version: CatalogVersion) -> Result<Arc<Catalog>, CatalogError> {
        let parsed = match version {
            CatalogVersion::Phb2014 => LazyLock::force(&CATALOG_2014),
            CatalogVersion::Phb2024 => LazyLock::force(&CATALOG_2024),
        };
        match parsed {
            Ok(catalog) => Ok(Arc::clone(catalog)),
            Err(message) => Err(CatalogError::Embedded {
                version,
                message: message.clone(),
            }),
        }
    }

    /// Parse a catalog from a JSON array of spell records.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let spells: Vec<SpellRecord> = serde_json::from_str(json)?;
        Ok(Self::new(spells))
    }

    /// Load a catalog from a JSON file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).await?;
        Self::from_json_str(&content)
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    /// Spells in native catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &SpellRecord> {
        self.spells.iter()
    }

    pub fn spells(&self) -> &[SpellRecord] {
        &self.spells
    }

    /// Look up a spell by id.
    pub fn get(&self, id: SpellId) -> Option<&SpellRecord> {
        self.spells.iter().find(|s| s.id == id)
    }

    /// Every class name that appears in the catalog, sorted.
    pub fn all_classes(&self) -> Vec<String> {
        self.spells
            .iter()
            .flat_map(|s| s.classes.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Highest spell level in the catalog (0 when empty).
    pub fn max_level(&self) -> u8 {
        self.spells.iter().map(|s| s.level).max().unwrap_or(0)
    }

    /// Distinct levels present, ascending.
    pub fn levels(&self) -> Vec<u8> {
        self.spells
            .iter()
            .map(|s| s.level)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
