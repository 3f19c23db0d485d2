//! Enemy definitions supplied by the content layer.

use arrayvec::ArrayVec;

use super::techniques::TechniqueId;
use crate::config::CombatConfig;
use crate::stats::CombatStats;

/// Loot granted when the player wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rewards {
    pub exp: u64,
    pub stones: u64,
}

/// A PvE opponent: fixed stats, a fixed loadout of at most five techniques
/// and a reward table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyDefinition {
    pub id: String,
    pub name: String,
    pub stats: CombatStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loadout: ArrayVec<TechniqueId, { CombatConfig::LOADOUT_SLOTS }>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rewards: Rewards,
}
