//! Bonus application for status-driven stat modifiers.
//!
//! Calculation order: Flat → %Inc (summed, applied once) → Round → Clamp.

/// A single modifier contribution to one stat.
///
/// - **Flat**: additive delta applied first (e.g., +5 defense from iron skin)
/// - **Increased**: percentage delta, summed with the others and applied once
///   after the flat sum (e.g., -20 = −20% defense from sundered)
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bonus {
    Flat(f64),
    Increased(f64),
}

impl Bonus {
    pub fn flat(value: f64) -> Self {
        Bonus::Flat(value)
    }

    /// Create a percentage bonus (20 = +20%).
    pub fn increased(percent: f64) -> Self {
        Bonus::Increased(percent)
    }
}

/// Collection of bonuses applied in a fixed order.
///
/// ```
/// # use combat_core::stats::{Bonus, BonusStack};
/// let mut stack = BonusStack::new();
/// stack.add(Bonus::flat(5.0));
/// stack.add(Bonus::increased(20.0));
/// stack.add(Bonus::increased(-50.0));
///
/// // round((10 + 5) × (1 − 0.30)) = round(10.5) = 11
/// assert_eq!(stack.apply(10, 0, i64::MAX), 11);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BonusStack {
    bonuses: Vec<Bonus>,
}

impl BonusStack {
    pub fn new() -> Self {
        Self {
            bonuses: Vec::new(),
        }
    }

    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    pub fn extend(&mut self, bonuses: impl IntoIterator<Item = Bonus>) {
        self.bonuses.extend(bonuses);
    }

    /// Apply all bonuses to `base`, round to the nearest integer and clamp.
    ///
    /// ```text
    /// result = clamp(round((base + flat_sum) × (1 + inc_sum/100)), min, max)
    /// ```
    pub fn apply(&self, base: i64, min: i64, max: i64) -> i64 {
        let flat_sum: f64 = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Flat(v) => Some(*v),
                _ => None,
            })
            .sum();

        let inc_sum: f64 = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Increased(p) => Some(*p),
                _ => None,
            })
            .sum();

        let value = (base as f64 + flat_sum) * (1.0 + inc_sum / 100.0);
        (value.round() as i64).clamp(min, max)
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bonuses.len()
    }
}

/// Standard bounds for combat stats.
pub struct StatBounds;

impl StatBounds {
    /// Core stats never drop below zero after modifiers.
    pub const CORE_STATS: (i64, i64) = (0, i64::MAX);
}
