//! Core combat stats.
//!
//! [`CombatStats`] is the external input shape (equipment already folded in by
//! the caller); [`CoreStats`] is the per-combatant triple the formulas read.

/// Stats a technique can scale from or a modifier can touch.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKind {
    #[default]
    Strength,
    Defense,
    Evasion,
}

/// Strength, defense and evasion of one combatant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoreStats {
    pub strength: i64,
    pub defense: i64,
    pub evasion: i64,
}

impl CoreStats {
    pub fn new(strength: i64, defense: i64, evasion: i64) -> Self {
        Self {
            strength,
            defense,
            evasion,
        }
    }

    pub fn get(&self, kind: StatKind) -> i64 {
        match kind {
            StatKind::Strength => self.strength,
            StatKind::Defense => self.defense,
            StatKind::Evasion => self.evasion,
        }
    }

    pub fn set(&mut self, kind: StatKind, value: i64) {
        match kind {
            StatKind::Strength => self.strength = value,
            StatKind::Defense => self.defense = value,
            StatKind::Evasion => self.evasion = value,
        }
    }
}

/// Combat-ready stats supplied by the caller. Missing values default to zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatStats {
    pub strength: i64,
    pub defense: i64,
    /// Starting and maximum qi.
    pub qi: f64,
    pub max_hp: i64,
    pub evasion: Option<i64>,
}

impl CombatStats {
    pub fn core(&self) -> CoreStats {
        CoreStats::new(self.strength, self.defense, self.evasion.unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evasion_defaults_to_zero() {
        let stats = CombatStats {
            strength: 10,
            defense: 4,
            qi: 20.0,
            max_hp: 100,
            evasion: None,
        };
        assert_eq!(stats.core(), CoreStats::new(10, 4, 0));
    }

    #[test]
    fn get_and_set_by_kind() {
        let mut stats = CoreStats::default();
        stats.set(StatKind::Defense, 12);
        assert_eq!(stats.get(StatKind::Defense), 12);
        assert_eq!("EVASION".parse::<StatKind>().unwrap(), StatKind::Evasion);
    }
}
