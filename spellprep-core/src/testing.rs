//! Testing utilities.
//!
//! This module provides fixtures for unit and integration tests:
//! - `SpellBuilder` for constructing spell records with sensible defaults
//! - `three_spell_catalog` for the canonical cantrip + two first-level spells

use crate::catalog::Catalog;
use crate::spells::{Component, SpellId, SpellRecord};

/// Builder for spell records in tests.
pub struct SpellBuilder {
    spell: SpellRecord,
}

impl SpellBuilder {
    /// Start a spell with the given id, name and level. Everything else gets
    /// plain defaults (V, S components; instantaneous; no class).
    pub fn new(id: u32, name: impl Into<String>, level: u8) -> Self {
        Self {
            spell: SpellRecord {
                id: SpellId(id),
                name: name.into(),
                level,
                classes: Vec::new(),
                school: "Воплощение".to_string(),
                casting_time: "Действие".to_string(),
                range: "60 футов".to_string(),
                components: vec![Component::V, Component::S],
                material: None,
                duration: "Мгновенная".to_string(),
                concentration: false,
                ritual: false,
                description: String::new(),
                at_higher_levels: None,
            },
        }
    }

    pub fn classes(mut self, classes: &[&str]) -> Self {
        self.spell.classes = classes.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn school(mut self, school: impl Into<String>) -> Self {
        self.spell.school = school.into();
        self
    }

    pub fn casting_time(mut self, casting_time: impl Into<String>) -> Self {
        self.spell.casting_time = casting_time.into();
        self
    }

    pub fn range(mut self, range: impl Into<String>) -> Self {
        self.spell.range = range.into();
        self
    }

    pub fn components(mut self, components: &[Component]) -> Self {
        self.spell.components = components.to_vec();
        self
    }

    pub fn material(mut self, material: impl Into<String>) -> Self {
        self.spell.material = Some(material.into());
        self
    }

    pub fn duration(mut self, duration: impl Into<String>) -> Self {
        self.spell.duration = duration.into();
        self
    }

    pub fn concentration(mut self) -> Self {
        self.spell.concentration = true;
        self
    }

    pub fn ritual(mut self) -> Self {
        self.spell.ritual = true;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.spell.description = description.into();
        self
    }

    pub fn higher_levels(mut self, text: impl Into<String>) -> Self {
        self.spell.at_higher_levels = Some(text.into());
        self
    }

    pub fn build(self) -> SpellRecord {
        self.spell
    }
}

/// A cantrip (id 1) and two first-level spells (ids 2 and 3).
pub fn three_spell_catalog() -> Catalog {
    Catalog::new(vec![
        SpellBuilder::new(1, "Огненный снаряд", 0)
            .classes(&["Волшебник", "Чародей"])
            .description("Сгусток огня.")
            .build(),
        SpellBuilder::new(2, "Волшебная стрела", 1)
            .classes(&["Волшебник", "Чародей"])
            .description("Три светящихся дротика.")
            .build(),
        SpellBuilder::new(3, "Лечение ран", 1)
            .classes(&["Жрец", "Друид"])
            .range("Касание")
            .description("Восстанавливает хиты.")
            .build(),
    ])
}
