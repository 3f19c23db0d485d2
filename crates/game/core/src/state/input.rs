use crate::env::TechniqueId;
use crate::stats::CombatStats;

/// Player side of a bout, already resolved by the caller.
///
/// `stats` must include equipment bonuses. `loadout`, when given, replaces
/// `equipped_techniques` as the slot order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerCombatData {
    pub name: String,
    pub stats: CombatStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipped_techniques: Vec<Option<TechniqueId>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loadout: Option<Vec<Option<TechniqueId>>>,
}

impl PlayerCombatData {
    /// Slots the player fights with.
    pub fn slots(&self) -> &[Option<TechniqueId>] {
        self.loadout.as_deref().unwrap_or(&self.equipped_techniques)
    }
}
