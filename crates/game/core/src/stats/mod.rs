//! Stat model.
//!
//! ```text
//! [ CombatStats (caller input) ]
//!      ↓
//! [ CoreStats (base) ] + active status modifiers
//!      ↓
//! [ CoreStats (derived) ]  read by every formula
//! ```
//!
//! Derived stats are recomputed whenever a combatant's active effects change.

pub mod bonus;
pub mod core;
pub mod derived;

pub use bonus::{Bonus, BonusStack, StatBounds};
pub use self::core::{CombatStats, CoreStats, StatKind};
pub use derived::recalc_derived_stats;
