//! Mutable bout state.
//!
//! Each side owns a [`CombatantState`] with its resources, loadout cursor,
//! action timer and [`ActiveEffects`]. Nothing outside a single simulation
//! call observes these values.

mod combatant;
mod input;
mod loadout;
mod status;

pub use combatant::{CombatantState, ResourceSnapshot, Side};
pub use input::PlayerCombatData;
pub use loadout::Loadout;
pub use status::{ActiveEffects, EffectInstance};
