//! Accuracy check.

use crate::env::TechniqueDefinition;
use crate::stats::CoreStats;

/// Hit iff `roll ≤ accuracy − evasion`, with `roll` uniform in `[0, 100]`.
pub fn accuracy_check(technique: &TechniqueDefinition, defender: &CoreStats, roll: f64) -> bool {
    roll <= technique.accuracy() - defender.evasion as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evasion_lowers_hit_chance() {
        let technique = TechniqueDefinition::fallback_struggle();
        let dodgy = CoreStats::new(0, 0, 30);

        assert!(accuracy_check(&technique, &dodgy, 70.0));
        assert!(!accuracy_check(&technique, &dodgy, 70.5));
        assert!(accuracy_check(&technique, &CoreStats::default(), 100.0));
    }

    #[test]
    fn missing_accuracy_means_certain_hit() {
        let mut technique = TechniqueDefinition::fallback_struggle();
        technique.accuracy = None;
        assert!(accuracy_check(&technique, &CoreStats::default(), 100.0));
    }
}
