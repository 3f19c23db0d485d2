//! Fixed-size round-robin technique loadout.

use crate::config::CombatConfig;
use crate::env::{TechniqueId, TechniqueOracle};

const SLOTS: usize = CombatConfig::LOADOUT_SLOTS;

/// Five technique slots executed in order, wrapping around.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Loadout {
    slots: [Option<TechniqueId>; SLOTS],
}

impl Loadout {
    /// Build from any slot list; shorter lists are padded with empty slots,
    /// longer ones are truncated.
    pub fn from_slots(slots: impl IntoIterator<Item = Option<TechniqueId>>) -> Self {
        let mut loadout = Self::default();
        for (slot, technique) in loadout.slots.iter_mut().zip(slots) {
            *slot = technique;
        }
        loadout
    }

    pub fn from_ids(ids: impl IntoIterator<Item = TechniqueId>) -> Self {
        Self::from_slots(ids.into_iter().map(Some))
    }

    pub fn get(&self, slot: usize) -> Option<&TechniqueId> {
        self.slots.get(slot % SLOTS).and_then(Option::as_ref)
    }

    pub fn first(&self) -> Option<&TechniqueId> {
        self.get(0)
    }

    pub fn next_slot(slot: usize) -> usize {
        (slot + 1) % SLOTS
    }

    /// True when no slot names a technique known to the catalog.
    pub fn has_no_usable<T>(&self, techniques: &T) -> bool
    where
        T: TechniqueOracle + ?Sized,
    {
        self.slots
            .iter()
            .flatten()
            .all(|id| techniques.technique(id.as_str()).is_none())
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&TechniqueId>> {
        self.slots.iter().map(Option::as_ref)
    }
}
