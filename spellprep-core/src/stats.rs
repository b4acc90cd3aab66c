//! Grouping by level and preparation statistics.

use crate::catalog::Catalog;
use crate::selection::{PrepState, SelectionStore};
use crate::spells::SpellRecord;
use std::collections::BTreeMap;

/// Group spells by level, cantrips first. Input order is kept within a level.
pub fn group_by_level<'a, I>(spells: I) -> BTreeMap<u8, Vec<&'a SpellRecord>>
where
    I: IntoIterator<Item = &'a SpellRecord>,
{
    let mut groups: BTreeMap<u8, Vec<&'a SpellRecord>> = BTreeMap::new();
    for spell in spells {
        groups.entry(spell.level).or_default().push(spell);
    }
    groups
}

/// Prepared counts for one level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelCounts {
    pub prepared: usize,
    pub always_prepared: usize,
}

impl LevelCounts {
    pub fn is_zero(&self) -> bool {
        self.prepared == 0 && self.always_prepared == 0
    }
}

/// Aggregate preparation statistics.
///
/// Cantrips appear in `per_level` but never in the totals: they do not use
/// a daily preparation slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Only levels with at least one non-zero count.
    pub per_level: BTreeMap<u8, LevelCounts>,
    pub total_prepared: usize,
    pub total_always_prepared: usize,
}

impl Statistics {
    pub fn grand_total(&self) -> usize {
        self.total_prepared + self.total_always_prepared
    }

    /// True when there is nothing to show beyond cantrips.
    pub fn is_empty(&self) -> bool {
        self.grand_total() == 0
    }
}

/// Count prepared and always-prepared spells per level.
///
/// Selection entries whose id is not in `catalog` are ignored.
pub fn aggregate_statistics(selection: &SelectionStore, catalog: &Catalog) -> Statistics {
    let mut stats = Statistics::default();

    for spell in catalog.iter() {
        let state = selection.state(spell.id);
        if state == PrepState::NotPrepared {
            continue;
        }

        let counts = stats.per_level.entry(spell.level).or_default();
        match state {
            PrepState::Prepared => counts.prepared += 1,
            PrepState::AlwaysPrepared => counts.always_prepared += 1,
            PrepState::NotPrepared => {}
        }

        if spell.is_cantrip() {
            continue;
        }
        match state {
            PrepState::Prepared => stats.total_prepared += 1,
            PrepState::AlwaysPrepared => stats.total_always_prepared += 1,
            PrepState::NotPrepared => {}
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spells::SpellId;
    use crate::testing::{three_spell_catalog, SpellBuilder};

    #[test]
    fn test_group_by_level_sorted() {
        let catalog = Catalog::new(vec![
            SpellBuilder::new(1, "c", 3).build(),
            SpellBuilder::new(2, "a", 0).build(),
            SpellBuilder::new(3, "b", 1).build(),
            SpellBuilder::new(4, "d", 3).build(),
        ]);
        let groups = group_by_level(catalog.iter());
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec![0, 1, 3]);
        let third: Vec<_> = groups[&3].iter().map(|s| s.id.0).collect();
        assert_eq!(third, vec![1, 4]);
    }

    #[test]
    fn test_group_by_level_empty() {
        let groups = group_by_level(Vec::<&SpellRecord>::new());
        assert!(groups.is_empty());
    }

    #[test]
    fn test_scenario_totals_exclude_cantrips() {
        let catalog = three_spell_catalog();
        let mut selection = SelectionStore::new();
        selection.set(SpellId(2), PrepState::Prepared);
        selection.set(SpellId(3), PrepState::AlwaysPrepared);
        selection.set(SpellId(1), PrepState::Prepared);

        let stats = aggregate_statistics(&selection, &catalog);
        assert_eq!(stats.total_prepared, 1);
        assert_eq!(stats.total_always_prepared, 1);
        assert_eq!(stats.grand_total(), 2);
        assert_eq!(
            stats.per_level[&0],
            LevelCounts {
                prepared: 1,
                always_prepared: 0
            }
        );
        assert_eq!(
            stats.per_level[&1],
            LevelCounts {
                prepared: 1,
                always_prepared: 1
            }
        );
    }

    #[test]
    fn test_only_cantrips_grand_total_zero() {
        let catalog = Catalog::new(vec![
            SpellBuilder::new(1, "a", 0).build(),
            SpellBuilder::new(2, "b", 0).build(),
            SpellBuilder::new(3, "c", 1).build(),
        ]);
        let mut selection = SelectionStore::new();
        selection.set(SpellId(1), PrepState::Prepared);
        selection.set(SpellId(2), PrepState::AlwaysPrepared);

        let stats = aggregate_statistics(&selection, &catalog);
        assert_eq!(stats.grand_total(), 0);
        assert!(stats.is_empty());
        assert_eq!(stats.per_level.len(), 1);
    }

    #[test]
    fn test_zero_levels_omitted() {
        let catalog = Catalog::new(vec![
            SpellBuilder::new(1, "a", 1).build(),
            SpellBuilder::new(2, "b", 2).build(),
            SpellBuilder::new(3, "c", 5).build(),
        ]);
        let mut selection = SelectionStore::new();
        selection.set(SpellId(3), PrepState::Prepared);

        let stats = aggregate_statistics(&selection, &catalog);
        assert_eq!(stats.per_level.keys().copied().collect::<Vec<_>>(), vec![5]);
        assert!(stats.per_level.values().all(|c| !c.is_zero()));
    }

    #[test]
    fn test_unknown_ids_ignored() {
        let catalog = three_spell_catalog();
        let mut selection = SelectionStore::new();
        selection.set(SpellId(99), PrepState::Prepared);

        let stats = aggregate_statistics(&selection, &catalog);
        assert_eq!(stats, Statistics::default());
    }
}
