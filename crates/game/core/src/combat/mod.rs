//! Pure combat formulas: accuracy, mitigation, buff multipliers, damage and
//! shield-first HP application.

mod damage;
mod hit;

pub use damage::{MITIGATION_K, apply_damage, buff_multiplier, compute_damage, mitigation_ratio};
pub use hit::accuracy_check;
