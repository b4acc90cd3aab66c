//! Per-spell preparation state.
//!
//! Every spell cycles through three states on toggle:
//! `NotPrepared -> Prepared -> AlwaysPrepared -> NotPrepared`.
//! Only non-default states are stored; a missing key means `NotPrepared`.

use crate::spells::SpellId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Preparation state of a single spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PrepState {
    #[default]
    NotPrepared,
    Prepared,
    AlwaysPrepared,
}

impl PrepState {
    /// The state one toggle further along the cycle.
    pub fn next(&self) -> Self {
        match self {
            PrepState::NotPrepared => PrepState::Prepared,
            PrepState::Prepared => PrepState::AlwaysPrepared,
            PrepState::AlwaysPrepared => PrepState::NotPrepared,
        }
    }

    /// Whether a spell in this state goes into the exported document.
    pub fn is_exported(&self) -> bool {
        !matches!(self, PrepState::NotPrepared)
    }

    /// Marker used in list views.
    pub fn marker(&self) -> &'static str {
        match self {
            PrepState::NotPrepared => "[ ]",
            PrepState::Prepared => "[x]",
            PrepState::AlwaysPrepared => "[*]",
        }
    }
}

/// Sparse map of spell id to non-default preparation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    states: HashMap<SpellId, PrepState>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of a spell.
    pub fn state(&self, id: SpellId) -> PrepState {
        self.states.get(&id).copied().unwrap_or_default()
    }

    /// Advance a spell one step along the cycle and return its new state.
    pub fn toggle(&mut self, id: SpellId) -> PrepState {
        let next = self.state(id).next();
        self.set(id, next);
        next
    }

    /// Put a spell into a specific state.
    pub fn set(&mut self, id: SpellId, state: PrepState) {
        if state == PrepState::NotPrepared {
            self.states.remove(&id);
        } else {
            self.states.insert(id, state);
        }
    }

    /// Clear every entry.
    pub fn reset_all(&mut self) {
        self.states.clear();
    }

    /// Number of spells in a non-default state, cantrips included.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of spells in exactly this state.
    pub fn count(&self, state: PrepState) -> usize {
        match state {
            PrepState::NotPrepared => 0,
            _ => self.states.values().filter(|s| **s == state).count(),
        }
    }

    /// Non-default entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (SpellId, PrepState)> + '_ {
        self.states.iter().map(|(id, state)| (*id, *state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_not_prepared() {
        let store = SelectionStore::new();
        assert_eq!(store.state(SpellId(42)), PrepState::NotPrepared);
        assert!(store.is_empty());
    }

    #[test]
    fn test_toggle_cycle() {
        let mut store = SelectionStore::new();
        let id = SpellId(1);
        assert_eq!(store.toggle(id), PrepState::Prepared);
        assert_eq!(store.toggle(id), PrepState::AlwaysPrepared);
        assert_eq!(store.toggle(id), PrepState::NotPrepared);
        assert!(store.is_empty(), "default state must not be stored");
    }

    #[test]
    fn test_toggle_thrice_is_identity() {
        let mut store = SelectionStore::new();
        store.set(SpellId(1), PrepState::AlwaysPrepared);
        store.set(SpellId(2), PrepState::Prepared);
        let before = store.clone();

        for _ in 0..3 {
            store.toggle(SpellId(1));
            store.toggle(SpellId(3));
        }
        assert_eq!(store, before);

        for _ in 0..6 {
            store.toggle(SpellId(2));
        }
        assert_eq!(store, before);
    }

    #[test]
    fn test_set_not_prepared_equals_absent() {
        let mut explicit = SelectionStore::new();
        explicit.set(SpellId(5), PrepState::Prepared);
        explicit.set(SpellId(5), PrepState::NotPrepared);
        explicit.set(SpellId(6), PrepState::NotPrepared);

        assert_eq!(explicit, SelectionStore::new());
        assert_eq!(explicit.len(), 0);
    }

    #[test]
    fn test_counts() {
        let mut store = SelectionStore::new();
        store.set(SpellId(1), PrepState::Prepared);
        store.set(SpellId(2), PrepState::Prepared);
        store.set(SpellId(3), PrepState::AlwaysPrepared);
        assert_eq!(store.len(), 3);
        assert_eq!(store.count(PrepState::Prepared), 2);
        assert_eq!(store.count(PrepState::AlwaysPrepared), 1);
        assert_eq!(store.count(PrepState::NotPrepared), 0);
    }

    #[test]
    fn test_reset_all() {
        let mut store = SelectionStore::new();
        store.toggle(SpellId(1));
        store.toggle(SpellId(2));
        store.reset_all();
        assert!(store.is_empty());
        assert_eq!(store.state(SpellId(1)), PrepState::NotPrepared);
    }

    #[test]
    fn test_is_exported() {
        assert!(!PrepState::NotPrepared.is_exported());
        assert!(PrepState::Prepared.is_exported());
        assert!(PrepState::AlwaysPrepared.is_exported());
    }
}
