//! Live status instances carried by a combatant.

use super::Side;
use crate::config::time_reached;
use crate::env::{StatusEffectDefinition, StatusId, StatusOracle};

/// One live application of a status effect.
///
/// Stacks are plain values in a list; nothing addresses an individual stack
/// from outside, so instances carry no identity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectInstance {
    pub effect_id: StatusId,
    pub expire_time: f64,
    pub next_tick_time: f64,
    /// Per-tick magnitude, snapshotted at application time.
    pub stored_value: f64,
    /// Side whose technique applied this instance.
    pub source: Side,
}

/// Ordered list of live status instances.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActiveEffects {
    instances: Vec<EffectInstance>,
}

impl ActiveEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `definition` at `now` following its stacking policy.
    ///
    /// Stacking: a new instance is pushed unless the cap is reached, in which
    /// case the soonest-expiring instance gets a fresh expiry and keeps its
    /// stored value. Non-stacking: the single instance is refreshed with the
    /// new expiry, stored value and source, or created when absent.
    pub fn apply(
        &mut self,
        definition: &StatusEffectDefinition,
        now: f64,
        duration: f64,
        stored_value: f64,
        source: Side,
    ) {
        let expire_time = now + duration;

        if definition.can_stack {
            if self.count_of(&definition.id) < definition.stack_limit() {
                self.push(definition, now, expire_time, stored_value, source);
                return;
            }
            let soonest = self
                .instances
                .iter_mut()
                .filter(|instance| instance.effect_id == definition.id)
                .min_by(|a, b| a.expire_time.total_cmp(&b.expire_time));
            if let Some(instance) = soonest {
                instance.expire_time = expire_time;
            }
            return;
        }

        match self
            .instances
            .iter_mut()
            .find(|instance| instance.effect_id == definition.id)
        {
            Some(instance) => {
                instance.expire_time = expire_time;
                instance.stored_value = stored_value;
                instance.source = source;
            }
            None => self.push(definition, now, expire_time, stored_value, source),
        }
    }

    fn push(
        &mut self,
        definition: &StatusEffectDefinition,
        now: f64,
        expire_time: f64,
        stored_value: f64,
        source: Side,
    ) {
        self.instances.push(EffectInstance {
            effect_id: definition.id.clone(),
            expire_time,
            next_tick_time: now + definition.tick_interval,
            stored_value,
            source,
        });
    }

    /// Remove every instance with `expire_time ≤ now`, returning their ids in
    /// list order.
    pub fn remove_expired(&mut self, now: f64) -> Vec<StatusId> {
        let mut expired = Vec::new();
        self.instances.retain(|instance| {
            if time_reached(now, instance.expire_time) {
                expired.push(instance.effect_id.clone());
                false
            } else {
                true
            }
        });
        expired
    }

    pub fn count_of(&self, id: &StatusId) -> usize {
        self.instances
            .iter()
            .filter(|instance| &instance.effect_id == id)
            .count()
    }

    /// True when any live instance forbids acting. Unknown ids never block.
    pub fn blocks_action<S>(&self, statuses: &S) -> bool
    where
        S: StatusOracle + ?Sized,
    {
        self.instances.iter().any(|instance| {
            statuses
                .status(instance.effect_id.as_str())
                .is_some_and(|definition| !definition.can_act)
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &EffectInstance> {
        self.instances.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut EffectInstance> {
        self.instances.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::StatusKind;

    fn create_test_definition(can_stack: bool, max_stacks: u32) -> StatusEffectDefinition {
        StatusEffectDefinition {
            id: StatusId::new("poison"),
            name: "Poison".into(),
            kind: StatusKind::Dot,
            tick_interval: 1.0,
            can_stack,
            max_stacks,
            can_act: true,
            stat_mod: Vec::new(),
        }
    }

    #[test]
    fn stacking_caps_and_refreshes_soonest() {
        let definition = create_test_definition(true, 3);
        let mut effects = ActiveEffects::new();

        effects.apply(&definition, 0.0, 5.0, 4.0, Side::Player);
        effects.apply(&definition, 1.0, 5.0, 6.0, Side::Player);
        effects.apply(&definition, 2.0, 5.0, 8.0, Side::Player);
        assert_eq!(effects.count_of(&definition.id), 3);
        effects.apply(&definition, 3.0, 5.0, 9.0, Side::Enemy);

        assert_eq!(effects.count_of(&definition.id), 3);
        let expiries: Vec<f64> = effects.iter().map(|i| i.expire_time).collect();
        assert_eq!(expiries, vec![8.0, 6.0, 7.0]);
        // refresh keeps the snapshot and caster of the refreshed stack
        let refreshed = effects.iter().next().unwrap();
        assert_eq!(refreshed.stored_value, 4.0);
        assert_eq!(refreshed.source, Side::Player);
    }

    #[test]
    fn non_stacking_refreshes_expiry_and_value() {
        let definition = create_test_definition(false, 1);
        let mut effects = ActiveEffects::new();

        effects.apply(&definition, 0.0, 6.0, 3.0, Side::Player);
        effects.apply(&definition, 2.5, 6.0, 7.0, Side::Enemy);

        assert_eq!(effects.len(), 1);
        let instance = effects.iter().next().unwrap();
        assert_eq!(instance.expire_time, 8.5);
        assert_eq!(instance.stored_value, 7.0);
        assert_eq!(instance.source, Side::Enemy);
    }

    #[test]
    fn expiry_is_inclusive() {
        let definition = create_test_definition(true, 3);
        let mut effects = ActiveEffects::new();
        effects.apply(&definition, 0.0, 1.0, 1.0, Side::Enemy);
        effects.apply(&definition, 0.0, 2.0, 1.0, Side::Enemy);

        assert!(effects.remove_expired(0.9).is_empty());
        assert_eq!(effects.remove_expired(1.0), vec![StatusId::new("poison")]);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn first_tick_is_one_interval_after_application() {
        let definition = create_test_definition(false, 1);
        let mut effects = ActiveEffects::new();
        effects.apply(&definition, 4.0, 6.0, 2.0, Side::Player);
        assert_eq!(effects.iter().next().unwrap().next_tick_time, 5.0);
    }
}
