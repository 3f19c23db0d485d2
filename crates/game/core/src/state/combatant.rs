//! Mutable per-side bout state.

use super::input::PlayerCombatData;
use super::loadout::Loadout;
use super::status::ActiveEffects;
use crate::env::{EnemyDefinition, StatusOracle, TechniqueOracle};
use crate::stats::{CombatStats, CoreStats, recalc_derived_stats};

/// Which side of the bout an entry or combatant belongs to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    /// Stable numeric id used when deriving roll seeds.
    pub fn index(self) -> u32 {
        match self {
            Side::Player => 0,
            Side::Enemy => 1,
        }
    }
}

/// Resource view of a combatant for client bootstrap and result persistence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ResourceSnapshot {
    /// Clamped at zero.
    pub hp: i64,
    pub max_hp: i64,
    /// Rounded down.
    pub qi: i64,
    pub max_qi: i64,
}

/// State of one combatant for the duration of a bout.
///
/// Built once at bout start and mutated only by the engine. `hp` may drop
/// below zero; death is `hp <= 0`.
#[derive(Clone, Debug, PartialEq)]
pub struct CombatantState {
    pub side: Side,
    pub name: String,
    pub hp: i64,
    pub max_hp: i64,
    pub qi: f64,
    pub max_qi: f64,
    pub base_stats: CoreStats,
    pub derived_stats: CoreStats,
    pub active_effects: ActiveEffects,
    pub shield: i64,
    pub loadout: Loadout,
    pub next_action_time: f64,
    pub current_slot: usize,
    pub consecutive_skips: u32,
    pub last_action_time: f64,
}

impl CombatantState {
    /// Fresh state at full HP and qi. `next_action_time` starts at the first
    /// slot technique's `initial_charge`, or zero.
    pub fn new<T>(
        side: Side,
        name: impl Into<String>,
        stats: &CombatStats,
        loadout: Loadout,
        techniques: &T,
    ) -> Self
    where
        T: TechniqueOracle + ?Sized,
    {
        let base_stats = stats.core();
        let max_qi = stats.qi.max(0.0);
        let initial_charge = loadout
            .first()
            .and_then(|id| techniques.technique(id.as_str()))
            .and_then(|technique| technique.initial_charge)
            .unwrap_or(0.0);

        Self {
            side,
            name: name.into(),
            hp: stats.max_hp,
            max_hp: stats.max_hp,
            qi: max_qi,
            max_qi,
            base_stats,
            derived_stats: base_stats,
            active_effects: ActiveEffects::new(),
            shield: 0,
            loadout,
            next_action_time: initial_charge,
            current_slot: 0,
            consecutive_skips: 0,
            last_action_time: 0.0,
        }
    }

    pub fn from_player<T>(player: &PlayerCombatData, techniques: &T) -> Self
    where
        T: TechniqueOracle + ?Sized,
    {
        let loadout = Loadout::from_slots(player.slots().iter().cloned());
        Self::new(Side::Player, &player.name, &player.stats, loadout, techniques)
    }

    pub fn from_enemy<T>(enemy: &EnemyDefinition, techniques: &T) -> Self
    where
        T: TechniqueOracle + ?Sized,
    {
        let loadout = Loadout::from_ids(enemy.loadout.iter().cloned());
        Self::new(Side::Enemy, &enemy.name, &enemy.stats, loadout, techniques)
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Heal up to max HP, returning the amount actually restored.
    pub fn heal(&mut self, amount: i64) -> i64 {
        let before = self.hp;
        self.hp = (self.hp + amount.max(0)).min(self.max_hp);
        (self.hp - before).max(0)
    }

    pub fn restore_qi(&mut self, amount: f64) {
        self.qi = (self.qi + amount).clamp(0.0, self.max_qi);
    }

    pub fn spend_qi(&mut self, amount: f64) {
        self.qi = (self.qi - amount).clamp(0.0, self.max_qi);
    }

    pub fn advance_slot(&mut self) {
        self.current_slot = Loadout::next_slot(self.current_slot);
    }

    /// Refresh derived stats after any change to active effects.
    pub fn recalc_derived_stats<S>(&mut self, statuses: &S)
    where
        S: StatusOracle + ?Sized,
    {
        self.derived_stats = recalc_derived_stats(self.base_stats, &self.active_effects, statuses);
    }

    pub fn is_stunned<S>(&self, statuses: &S) -> bool
    where
        S: StatusOracle + ?Sized,
    {
        self.active_effects.blocks_action(statuses)
    }

    pub fn snapshot(&self) -> ResourceSnapshot {
        ResourceSnapshot {
            hp: self.hp.max(0),
            max_hp: self.max_hp,
            qi: self.qi.floor() as i64,
            max_qi: self.max_qi.floor() as i64,
        }
    }
}
