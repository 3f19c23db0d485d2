//! Turn resolution and technique effects.

mod effect;
mod turn;

pub use effect::{TechniqueOutcome, apply_technique_effect};
pub use turn::{TurnPhase, resolve_turn};
