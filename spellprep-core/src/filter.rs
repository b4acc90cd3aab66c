//! Filter criteria and the visible-spell pipeline.
//!
//! Filtering runs in two stages. The "available" stage narrows the catalog by
//! class and maximum level; the "visible" stage then applies the exact level
//! button and the name search. Catalog order is preserved throughout.

use crate::catalog::Catalog;
use crate::spells::SpellRecord;
use serde::{Deserialize, Serialize};

/// Highest level selectable in the max-level filter.
pub const MAX_SPELL_LEVEL: u8 = 9;

/// Current filter settings. All constraints are conjunctive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Only spells on this class list; `None` means all classes.
    pub selected_class: Option<String>,
    /// Inclusive upper bound on spell level.
    pub max_level: u8,
    /// Case-insensitive substring of the spell name.
    pub search_query: String,
    /// Exact level match; `None` means all levels.
    pub level_filter: Option<u8>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            selected_class: None,
            max_level: MAX_SPELL_LEVEL,
            search_query: String::new(),
            level_filter: None,
        }
    }
}

impl FilterCriteria {
    fn class_matches(&self, spell: &SpellRecord) -> bool {
        match self.selected_class.as_deref() {
            None | Some("") => true,
            Some(class) => spell.has_class(class),
        }
    }

    fn level_in_range(&self, spell: &SpellRecord) -> bool {
        spell.level <= self.max_level
    }

    fn level_matches(&self, spell: &SpellRecord) -> bool {
        self.level_filter.map_or(true, |level| spell.level == level)
    }

    fn name_matches(&self, spell: &SpellRecord, needle: &str) -> bool {
        needle.is_empty() || spell.name.to_lowercase().contains(needle)
    }

    /// Whether a single spell passes every active constraint.
    pub fn matches(&self, spell: &SpellRecord) -> bool {
        let needle = self.search_query.to_lowercase();
        self.class_matches(spell)
            && self.level_in_range(spell)
            && self.level_matches(spell)
            && self.name_matches(spell, &needle)
    }
}

/// Spells passing the class and max-level constraints.
pub fn available_spells<'a>(catalog: &'a Catalog, criteria: &FilterCriteria) -> Vec<&'a SpellRecord> {
    catalog
        .iter()
        .filter(|spell| criteria.class_matches(spell) && criteria.level_in_range(spell))
        .collect()
}

/// Spells shown in the list for the given criteria, in catalog order.
pub fn visible_spells<'a>(catalog: &'a Catalog, criteria: &FilterCriteria) -> Vec<&'a SpellRecord> {
    let needle = criteria.search_query.to_lowercase();
    available_spells(catalog, criteria)
        .into_iter()
        .filter(|spell| criteria.level_matches(spell) && criteria.name_matches(spell, &needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spells::SpellId;
    use crate::testing::SpellBuilder;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            SpellBuilder::new(1, "Огненный снаряд", 0).classes(&["Волшебник"]).build(),
            SpellBuilder::new(2, "Лечение ран", 1).classes(&["Жрец", "Друид"]).build(),
            SpellBuilder::new(3, "Огненный шар", 3).classes(&["Волшебник"]).build(),
            SpellBuilder::new(4, "Духовные стражи", 3).classes(&["Жрец"]).build(),
            SpellBuilder::new(5, "Щит", 1).classes(&["Волшебник"]).build(),
        ])
    }

    fn ids(spells: &[&SpellRecord]) -> Vec<u32> {
        spells.iter().map(|s| s.id.0).collect()
    }

    #[test]
    fn test_default_shows_everything_in_order() {
        let catalog = catalog();
        let visible = visible_spells(&catalog, &FilterCriteria::default());
        assert_eq!(ids(&visible), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_class_filter() {
        let catalog = catalog();
        let criteria = FilterCriteria {
            selected_class: Some("Жрец".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&visible_spells(&catalog, &criteria)), vec![2, 4]);
    }

    #[test]
    fn test_empty_class_means_all() {
        let catalog = catalog();
        let criteria = FilterCriteria {
            selected_class: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(visible_spells(&catalog, &criteria).len(), 5);
    }

    #[test]
    fn test_max_level_inclusive() {
        let catalog = catalog();
        let criteria = FilterCriteria {
            max_level: 1,
            ..Default::default()
        };
        assert_eq!(ids(&visible_spells(&catalog, &criteria)), vec![1, 2, 5]);

        let cantrips_only = FilterCriteria {
            max_level: 0,
            ..Default::default()
        };
        assert_eq!(ids(&visible_spells(&catalog, &cantrips_only)), vec![1]);
    }

    #[test]
    fn test_level_filter_exact() {
        let catalog = catalog();
        let criteria = FilterCriteria {
            level_filter: Some(3),
            ..Default::default()
        };
        assert_eq!(ids(&visible_spells(&catalog, &criteria)), vec![3, 4]);
    }

    #[test]
    fn test_level_filter_above_max_level_is_empty() {
        let catalog = catalog();
        let criteria = FilterCriteria {
            max_level: 1,
            level_filter: Some(3),
            ..Default::default()
        };
        assert!(visible_spells(&catalog, &criteria).is_empty());
    }

    #[test]
    fn test_search_case_insensitive_cyrillic() {
        let catalog = catalog();
        let criteria = FilterCriteria {
            search_query: "ОГНЕН".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&visible_spells(&catalog, &criteria)), vec![1, 3]);
    }

    #[test]
    fn test_combined_constraints() {
        let catalog = catalog();
        let criteria = FilterCriteria {
            selected_class: Some("Волшебник".to_string()),
            max_level: 3,
            search_query: "шар".to_string(),
            level_filter: Some(3),
        };
        assert_eq!(ids(&visible_spells(&catalog, &criteria)), vec![3]);
    }

    #[test]
    fn test_membership_matches_predicates() {
        let catalog = catalog();
        let grid = [
            FilterCriteria::default(),
            FilterCriteria {
                selected_class: Some("Волшебник".to_string()),
                max_level: 1,
                ..Default::default()
            },
            FilterCriteria {
                search_query: "ра".to_string(),
                level_filter: Some(1),
                ..Default::default()
            },
        ];
        for criteria in &grid {
            let visible = visible_spells(&catalog, criteria);
            for spell in catalog.iter() {
                let shown = visible.iter().any(|s| s.id == spell.id);
                assert_eq!(shown, criteria.matches(spell), "spell {} / {:?}", spell.id, criteria);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let catalog = catalog();
        let criteria = FilterCriteria {
            search_query: "о".to_string(),
            ..Default::default()
        };
        assert_eq!(
            visible_spells(&catalog, &criteria),
            visible_spells(&catalog, &criteria)
        );
    }

    #[test]
    fn test_available_ignores_level_filter_and_search() {
        let catalog = catalog();
        let criteria = FilterCriteria {
            selected_class: Some("Жрец".to_string()),
            search_query: "zzz".to_string(),
            level_filter: Some(9),
            ..Default::default()
        };
        let available = available_spells(&catalog, &criteria);
        assert_eq!(
            available.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![SpellId(2), SpellId(4)]
        );
    }
}
