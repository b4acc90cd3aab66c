//! Spell records as shipped in the catalog data files.
//!
//! Records are plain reference data: they are deserialized once and never
//! mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a spell within one catalog version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpellId(pub u32);

impl fmt::Display for SpellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SpellId {
    fn from(id: u32) -> Self {
        SpellId(id)
    }
}

/// Spell component codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Component {
    /// Verbal
    V,
    /// Somatic
    S,
    /// Material
    M,
}

impl Component {
    pub fn code(&self) -> &'static str {
        match self {
            Component::V => "V",
            Component::S => "S",
            Component::M => "M",
        }
    }
}

/// Complete spell definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellRecord {
    pub id: SpellId,
    pub name: String,
    pub level: u8, // 0 for cantrips
    pub classes: Vec<String>,
    pub school: String,
    pub casting_time: String,
    pub range: String,
    pub components: Vec<Component>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    pub duration: String,
    #[serde(default)]
    pub concentration: bool,
    #[serde(default)]
    pub ritual: bool,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_higher_levels: Option<String>,
}

impl SpellRecord {
    /// Check if this spell is a cantrip.
    pub fn is_cantrip(&self) -> bool {
        self.level == 0
    }

    /// Check if the given class can use this spell.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Components joined for display, with the material detail folded into `M`.
    pub fn components_text(&self) -> String {
        self.components
            .iter()
            .map(|component| match (component, &self.material) {
                (Component::M, Some(material)) => format!("M ({material})"),
                _ => component.code().to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Duration with the concentration annotation.
    pub fn duration_text(&self) -> String {
        if self.concentration {
            format!("{} (Концентрация)", self.duration)
        } else {
            self.duration.clone()
        }
    }

    /// Short tags shown next to the name: `К` for concentration, `Р` for ritual.
    pub fn tags(&self) -> Vec<&'static str> {
        let mut tags = Vec::new();
        if self.concentration {
            tags.push("К");
        }
        if self.ritual {
            tags.push("Р");
        }
        tags
    }
}
