//! Derived stats: base stats with every active status modifier folded in.

use strum::IntoEnumIterator;

use super::bonus::{Bonus, BonusStack, StatBounds};
use super::core::{CoreStats, StatKind};
use crate::env::{ModTarget, StatusOracle};
use crate::state::ActiveEffects;

/// Recompute derived stats from `base` and the live status instances.
///
/// Each live instance contributes its definition's modifiers once, so three
/// stacks of a stacking debuff apply three times. Flat deltas are summed
/// first, then all percentage deltas for the stat are summed and applied once.
/// Results are rounded and clamped at zero. Unknown status ids contribute
/// nothing.
pub fn recalc_derived_stats<S>(base: CoreStats, effects: &ActiveEffects, statuses: &S) -> CoreStats
where
    S: StatusOracle + ?Sized,
{
    let mut derived = base;
    for kind in StatKind::iter() {
        let mut stack = BonusStack::new();
        for instance in effects.iter() {
            let Some(definition) = statuses.status(instance.effect_id.as_str()) else {
                continue;
            };
            stack.extend(definition.stat_mod.iter().filter_map(|modifier| {
                match modifier.target {
                    ModTarget::Flat(stat) if stat == kind => Some(Bonus::flat(modifier.value)),
                    ModTarget::Percent(stat) if stat == kind => {
                        Some(Bonus::increased(modifier.value))
                    }
                    _ => None,
                }
            }));
        }
        let (min, max) = StatBounds::CORE_STATS;
        derived.set(kind, stack.apply(base.get(kind), min, max));
    }
    derived
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{StatModifier, StatusEffectCatalog, StatusEffectDefinition, StatusId, StatusKind};
    use crate::state::Side;

    fn create_test_catalog() -> StatusEffectCatalog {
        StatusEffectCatalog::new([
            StatusEffectDefinition {
                id: StatusId::new("iron_skin"),
                name: "Iron Skin".into(),
                kind: StatusKind::StatMod,
                tick_interval: 0.0,
                can_stack: false,
                max_stacks: 1,
                can_act: true,
                stat_mod: vec![StatModifier {
                    target: ModTarget::Flat(StatKind::Defense),
                    value: 10.0,
                }],
            },
            StatusEffectDefinition {
                id: StatusId::new("sundered"),
                name: "Sundered".into(),
                kind: StatusKind::StatMod,
                tick_interval: 0.0,
                can_stack: true,
                max_stacks: 3,
                can_act: true,
                stat_mod: vec![StatModifier {
                    target: ModTarget::Percent(StatKind::Defense),
                    value: -20.0,
                }],
            },
        ])
        .unwrap()
    }

    #[test]
    fn flat_then_summed_percent() {
        let catalog = create_test_catalog();
        let mut effects = ActiveEffects::new();
        let iron_skin = catalog.get("iron_skin").unwrap();
        let sundered = catalog.get("sundered").unwrap();
        effects.apply(iron_skin, 0.0, 10.0, 0.0, Side::Player);
        effects.apply(sundered, 0.0, 10.0, 0.0, Side::Enemy);
        effects.apply(sundered, 0.0, 10.0, 0.0, Side::Enemy);

        let derived = recalc_derived_stats(CoreStats::new(20, 10, 5), &effects, &catalog);
        // (10 + 10) × (1 − 0.40) = 12
        assert_eq!(derived.defense, 12);
        assert_eq!(derived.strength, 20);
        assert_eq!(derived.evasion, 5);
    }

    #[test]
    fn without_effects_matches_base() {
        let catalog = create_test_catalog();
        let base = CoreStats::new(7, 3, 1);
        assert_eq!(recalc_derived_stats(base, &ActiveEffects::new(), &catalog), base);
    }
}
