//! Damage formulas.
//!
//! ```text
//! raw  = atk[scaling_stat] × power / 100
//! mit  = atk[scaling_stat] / (atk[scaling_stat] + defense × K)
//! dmg  = max(1, round(raw × mit × buff_multiplier))
//! ```

use crate::env::{ModTarget, StatusOracle, TechniqueDefinition};
use crate::state::{ActiveEffects, CombatantState};

/// Defense weight in the mitigation formula.
pub const MITIGATION_K: f64 = 1.0;

/// Fraction of raw damage that passes through `defense`, in `[0, 1)` for
/// positive defense. Zero when there is no attack force.
pub fn mitigation_ratio(attack_force: f64, defense: f64) -> f64 {
    if attack_force <= 0.0 {
        return 0.0;
    }
    attack_force / (attack_force + defense.max(0.0) * MITIGATION_K)
}

fn modifier_total<S>(effects: &ActiveEffects, statuses: &S, target: ModTarget) -> f64
where
    S: StatusOracle + ?Sized,
{
    effects
        .iter()
        .filter_map(|instance| statuses.status(instance.effect_id.as_str()))
        .flat_map(|definition| definition.stat_mod.iter())
        .filter(|modifier| modifier.target == target)
        .map(|modifier| modifier.value)
        .sum()
}

/// `1 + (attacker damage_pct + defender incoming_damage_pct) / 100`, floored
/// at zero. Every live stack contributes.
pub fn buff_multiplier<S>(
    attacker: &CombatantState,
    defender: Option<&CombatantState>,
    statuses: &S,
) -> f64
where
    S: StatusOracle + ?Sized,
{
    let outgoing = modifier_total(&attacker.active_effects, statuses, ModTarget::DamagePct);
    let incoming = defender
        .map(|defender| {
            modifier_total(&defender.active_effects, statuses, ModTarget::IncomingDamagePct)
        })
        .unwrap_or(0.0);
    (1.0 + (outgoing + incoming) / 100.0).max(0.0)
}

/// Direct damage of `technique` from `attacker` to `defender`. Always at least 1.
pub fn compute_damage<S>(
    attacker: &CombatantState,
    defender: &CombatantState,
    technique: &TechniqueDefinition,
    statuses: &S,
) -> i64
where
    S: StatusOracle + ?Sized,
{
    let attack = attacker.derived_stats.get(technique.scaling_stat) as f64;
    let raw = attack * technique.power / 100.0;
    let mitigation = mitigation_ratio(attack, defender.derived_stats.defense as f64);
    let multiplier = buff_multiplier(attacker, Some(defender), statuses);
    let damage = (raw * mitigation * multiplier).round() as i64;
    damage.max(1)
}

/// Shield absorbs first, the remainder comes off HP. Returns the HP lost.
pub fn apply_damage(target: &mut CombatantState, amount: i64) -> i64 {
    let amount = amount.max(0);
    let absorbed = amount.min(target.shield);
    target.shield -= absorbed;
    let hp_loss = amount - absorbed;
    target.hp -= hp_loss;
    hp_loss
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{
        StatModifier, StatusEffectCatalog, StatusEffectDefinition, StatusId, StatusKind,
        TechniqueCatalog,
    };
    use crate::state::{Loadout, Side};
    use crate::stats::CombatStats;

    fn create_test_combatant(strength: i64, defense: i64) -> CombatantState {
        CombatantState::new(
            Side::Player,
            "test",
            &CombatStats {
                strength,
                defense,
                qi: 50.0,
                max_hp: 200,
                evasion: None,
            },
            Loadout::default(),
            &TechniqueCatalog::empty(),
        )
    }

    fn create_buff_catalog() -> StatusEffectCatalog {
        StatusEffectCatalog::new([
            StatusEffectDefinition {
                id: StatusId::new("battle_fury"),
                name: "Battle Fury".into(),
                kind: StatusKind::StatMod,
                tick_interval: 0.0,
                can_stack: false,
                max_stacks: 1,
                can_act: true,
                stat_mod: vec![StatModifier {
                    target: ModTarget::DamagePct,
                    value: 50.0,
                }],
            },
            StatusEffectDefinition {
                id: StatusId::new("exposed"),
                name: "Exposed".into(),
                kind: StatusKind::StatMod,
                tick_interval: 0.0,
                can_stack: false,
                max_stacks: 1,
                can_act: true,
                stat_mod: vec![StatModifier {
                    target: ModTarget::IncomingDamagePct,
                    value: -200.0,
                }],
            },
        ])
        .unwrap()
    }

    #[test]
    fn mitigation_edges() {
        assert_eq!(mitigation_ratio(0.0, 50.0), 0.0);
        assert_eq!(mitigation_ratio(-5.0, 0.0), 0.0);
        assert_eq!(mitigation_ratio(50.0, 50.0), 0.5);
        assert!(mitigation_ratio(1e9, 0.0) > 0.999_999);
        assert!(mitigation_ratio(1e9, 1.0) < 1.0);
    }

    #[test]
    fn damage_example() {
        let attacker = create_test_combatant(50, 0);
        let defender = create_test_combatant(0, 0);
        let technique = TechniqueDefinition {
            power: 120.0,
            ..TechniqueDefinition::fallback_struggle()
        };
        let statuses = StatusEffectCatalog::empty();
        // 50 × 1.2 × 1.0 × 1.0
        assert_eq!(compute_damage(&attacker, &defender, &technique, &statuses), 60);
    }

    #[test]
    fn damage_is_at_least_one() {
        let statuses = StatusEffectCatalog::empty();
        let technique = TechniqueDefinition::fallback_struggle();
        for (strength, defense) in [(0, 0), (0, 100), (1, 1000), (3, 0)] {
            let attacker = create_test_combatant(strength, 0);
            let defender = create_test_combatant(0, defense);
            assert!(compute_damage(&attacker, &defender, &technique, &statuses) >= 1);
        }
    }

    #[test]
    fn damage_is_deterministic() {
        let statuses = StatusEffectCatalog::empty();
        let technique = TechniqueDefinition::fallback_struggle();
        let attacker = create_test_combatant(37, 0);
        let defender = create_test_combatant(0, 13);
        let first = compute_damage(&attacker, &defender, &technique, &statuses);
        for _ in 0..10 {
            assert_eq!(compute_damage(&attacker, &defender, &technique, &statuses), first);
        }
    }

    #[test]
    fn buff_multiplier_sums_and_floors() {
        let statuses = create_buff_catalog();
        let mut attacker = create_test_combatant(10, 0);
        let mut defender = create_test_combatant(0, 0);
        let fury = statuses.get("battle_fury").unwrap();
        attacker.active_effects.apply(fury, 0.0, 5.0, 0.0, Side::Player);
        assert_eq!(buff_multiplier(&attacker, None, &statuses), 1.5);

        let exposed = statuses.get("exposed").unwrap();
        defender.active_effects.apply(exposed, 0.0, 5.0, 0.0, Side::Player);
        assert_eq!(buff_multiplier(&attacker, Some(&defender), &statuses), 0.0);
    }

    #[test]
    fn shield_absorbs_first() {
        let mut target = create_test_combatant(0, 0);

        target.shield = 30;
        assert_eq!(apply_damage(&mut target, 20), 0);
        assert_eq!((target.hp, target.shield), (200, 10));

        assert_eq!(apply_damage(&mut target, 25), 15);
        assert_eq!((target.hp, target.shield), (185, 0));

        assert_eq!(apply_damage(&mut target, 190), 190);
        assert_eq!(target.hp, -5);
        assert!(target.is_dead());
    }
}
