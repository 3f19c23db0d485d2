//! Per-tick turn resolution for one combatant.
//!
//! Each tick an actor is classified into exactly one [`TurnPhase`] and the
//! matching transition runs. At most one log entry comes out of a turn.

use tracing::{debug, trace};

use super::effect::{TechniqueOutcome, apply_technique_effect};
use crate::config::{CombatConfig, time_reached};
use crate::engine::{CastDetail, LogEntry, LogKind};
use crate::env::{CombatEnv, RollStream, TechniqueDefinition};
use crate::state::CombatantState;

/// Where an actor stands in its action cycle at a given tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    /// A `can_act = false` effect is active. `ready` is set once the action
    /// timer has elapsed, which emits a `stunned` entry and re-arms the timer.
    Stunned { ready: bool },
    /// Waiting for the action timer; qi trickles back.
    CoolingDown,
    /// Too many skipped decisions in a row; the fallback struggle fires.
    ForcedStruggle,
    /// Free to use the technique in the current slot.
    Ready,
}

impl TurnPhase {
    pub fn classify(actor: &CombatantState, now: f64, env: &CombatEnv<'_>) -> Self {
        let timer_elapsed = time_reached(now, actor.next_action_time);
        if actor.is_stunned(env.statuses()) {
            TurnPhase::Stunned {
                ready: timer_elapsed,
            }
        } else if !timer_elapsed {
            TurnPhase::CoolingDown
        } else if actor.consecutive_skips >= env.config().struggle_threshold {
            TurnPhase::ForcedStruggle
        } else {
            TurnPhase::Ready
        }
    }
}

/// Resolve `actor`'s turn against `target` at `now`.
pub fn resolve_turn(
    actor: &mut CombatantState,
    target: &mut CombatantState,
    now: f64,
    env: &CombatEnv<'_>,
    rolls: &mut RollStream<'_>,
) -> Option<LogEntry> {
    let config = env.config();
    match TurnPhase::classify(actor, now, env) {
        TurnPhase::Stunned { ready: false } => None,
        TurnPhase::Stunned { ready: true } => {
            actor.next_action_time = now + config.stun_retry_delay;
            Some(LogEntry::stunned(now, actor.side, actor.next_action_time))
        }
        TurnPhase::CoolingDown => {
            actor.restore_qi(config.qi_trickle_per_tick());
            None
        }
        TurnPhase::ForcedStruggle => Some(force_struggle(actor, target, now, env, rolls)),
        TurnPhase::Ready => use_current_slot(actor, target, now, env, rolls),
    }
}

fn use_current_slot(
    actor: &mut CombatantState,
    target: &mut CombatantState,
    now: f64,
    env: &CombatEnv<'_>,
    rolls: &mut RollStream<'_>,
) -> Option<LogEntry> {
    let config = env.config();
    let techniques = env.techniques();

    // Ids missing from the catalog behave like empty slots.
    let technique = actor
        .loadout
        .get(actor.current_slot)
        .and_then(|id| techniques.technique(id.as_str()));

    let Some(technique) = technique else {
        actor.advance_slot();
        if actor.loadout.has_no_usable(techniques) {
            actor.consecutive_skips = config.struggle_threshold;
        }
        return None;
    };

    let cost = technique.qi_cost(actor.max_qi);
    if actor.qi + CombatConfig::QI_EPSILON < cost {
        actor.next_action_time = now + config.unaffordable_retry_delay;
        actor.advance_slot();
        actor.consecutive_skips += 1;
        trace!(
            side = %actor.side,
            technique = %technique.id,
            qi = actor.qi,
            cost,
            "technique unaffordable"
        );
        return None;
    }

    actor.spend_qi(cost);
    actor.next_action_time = now + technique.cooldown;
    let outcome = apply_technique_effect(technique, actor, target, now, env, rolls);
    actor.advance_slot();
    actor.consecutive_skips = 0;
    actor.last_action_time = now;

    trace!(
        side = %actor.side,
        technique = %technique.id,
        damage = outcome.damage,
        missed = outcome.missed,
        "technique cast"
    );

    Some(cast_entry(now, technique, outcome, cost, false, actor, target))
}

fn force_struggle(
    actor: &mut CombatantState,
    target: &mut CombatantState,
    now: f64,
    env: &CombatEnv<'_>,
    rolls: &mut RollStream<'_>,
) -> LogEntry {
    let config = env.config();
    let fallback;
    let technique = match env
        .techniques()
        .technique(CombatConfig::STRUGGLE_TECHNIQUE_ID)
    {
        Some(technique) => technique,
        None => {
            fallback = TechniqueDefinition::fallback_struggle();
            &fallback
        }
    };

    let outcome = apply_technique_effect(technique, actor, target, now, env, rolls);
    actor.restore_qi(config.struggle_qi_refund);
    actor.next_action_time = now + technique.cooldown;
    actor.consecutive_skips = 0;
    actor.last_action_time = now;

    debug!(
        side = %actor.side,
        time = now,
        damage = outcome.damage,
        missed = outcome.missed,
        "forced struggle"
    );

    cast_entry(now, technique, outcome, 0.0, true, actor, target)
}

fn cast_entry(
    now: f64,
    technique: &TechniqueDefinition,
    outcome: TechniqueOutcome,
    qi_spent: f64,
    forced: bool,
    actor: &CombatantState,
    target: &CombatantState,
) -> LogEntry {
    let kind = match (forced, outcome.missed) {
        (true, true) => LogKind::Miss,
        (true, false) => LogKind::Struggle,
        (false, _) => outcome.log_kind(),
    };
    LogEntry::cast(
        now,
        actor.side,
        kind,
        CastDetail {
            technique: technique.id.clone(),
            damage: outcome.damage,
            heal: outcome.heal,
            qi_restore: outcome.qi_restore,
            shield: outcome.shield,
            missed: outcome.missed,
            forced,
            applied_effects: outcome.applied_effects,
            qi_spent,
            target_hp: target.hp.max(0),
            target_shield: target.shield,
            actor_qi: actor.qi,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{
        Env, FixedRng, StatusEffectCatalog, StatusEffectDefinition, StatusId, StatusKind,
        TechniqueCatalog, TechniqueId,
    };
    use crate::state::{Loadout, Side};
    use crate::stats::CombatStats;

    struct Fixture {
        techniques: TechniqueCatalog,
        statuses: StatusEffectCatalog,
        rng: FixedRng,
        config: CombatConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let iron_fist = TechniqueDefinition {
                id: TechniqueId::new("iron_fist"),
                name: "Iron Fist".into(),
                cooldown: 3.0,
                qi_cost_base: 5.0,
                power: 120.0,
                ..TechniqueDefinition::fallback_struggle()
            };
            let stun = StatusEffectDefinition {
                id: StatusId::new("stun"),
                name: "Stun".into(),
                kind: StatusKind::Control,
                tick_interval: 0.0,
                can_stack: false,
                max_stacks: 1,
                can_act: false,
                stat_mod: Vec::new(),
            };
            Self {
                techniques: TechniqueCatalog::new([iron_fist]).unwrap(),
                statuses: StatusEffectCatalog::new([stun]).unwrap(),
                rng: FixedRng::always_hit(),
                config: CombatConfig::default(),
            }
        }

        fn env(&self) -> CombatEnv<'_> {
            Env::new(&self.techniques, &self.statuses, &self.rng, &self.config).into_combat_env()
        }

        fn combatant(&self, side: Side, qi: f64, slots: &[Option<&str>]) -> CombatantState {
            CombatantState::new(
                side,
                side.to_string(),
                &CombatStats {
                    strength: 50,
                    defense: 0,
                    qi,
                    max_hp: 200,
                    evasion: None,
                },
                Loadout::from_slots(slots.iter().map(|slot| slot.map(TechniqueId::new))),
                &self.techniques,
            )
        }
    }

    #[test]
    fn ready_cast_spends_qi_and_sets_cooldown() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut rolls = RollStream::new(&fixture.rng, 0);
        let mut actor = fixture.combatant(Side::Player, 50.0, &[Some("iron_fist")]);
        let mut target = fixture.combatant(Side::Enemy, 0.0, &[]);

        let entry = resolve_turn(&mut actor, &mut target, 0.0, &env, &mut rolls).unwrap();

        assert_eq!(entry.kind, LogKind::Damage);
        assert_eq!(actor.qi, 45.0);
        assert_eq!(actor.next_action_time, 3.0);
        assert_eq!(actor.current_slot, 1);
        assert_eq!(target.hp, 140);
        let detail = entry.cast_detail().unwrap();
        assert_eq!(detail.target_hp, 140);
        assert!(!detail.forced);
    }

    #[test]
    fn unaffordable_skips_and_counts() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut rolls = RollStream::new(&fixture.rng, 0);
        let mut actor = fixture.combatant(Side::Player, 4.0, &[Some("iron_fist")]);
        let mut target = fixture.combatant(Side::Enemy, 0.0, &[]);

        assert!(resolve_turn(&mut actor, &mut target, 2.0, &env, &mut rolls).is_none());
        assert_eq!(actor.consecutive_skips, 1);
        assert_eq!(actor.next_action_time, 3.0);
        assert_eq!(actor.current_slot, 1);
        assert_eq!(target.hp, 200);
    }

    #[test]
    fn cooldown_trickles_qi() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut rolls = RollStream::new(&fixture.rng, 0);
        let mut actor = fixture.combatant(Side::Player, 50.0, &[Some("iron_fist")]);
        let mut target = fixture.combatant(Side::Enemy, 0.0, &[]);
        actor.qi = 10.0;
        actor.next_action_time = 5.0;

        assert_eq!(TurnPhase::classify(&actor, 1.0, &env), TurnPhase::CoolingDown);
        assert!(resolve_turn(&mut actor, &mut target, 1.0, &env, &mut rolls).is_none());
        assert!((actor.qi - 10.05).abs() < 1e-9);
    }

    #[test]
    fn empty_loadout_forces_struggle() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut rolls = RollStream::new(&fixture.rng, 0);
        let mut actor = fixture.combatant(Side::Player, 20.0, &[]);
        let mut target = fixture.combatant(Side::Enemy, 0.0, &[]);

        assert!(resolve_turn(&mut actor, &mut target, 0.0, &env, &mut rolls).is_none());
        assert_eq!(actor.consecutive_skips, 5);
        assert_eq!(TurnPhase::classify(&actor, 0.1, &env), TurnPhase::ForcedStruggle);

        let entry = resolve_turn(&mut actor, &mut target, 0.1, &env, &mut rolls).unwrap();
        assert_eq!(entry.kind, LogKind::Struggle);
        assert!(entry.cast_detail().unwrap().forced);
        assert_eq!(actor.consecutive_skips, 0);
        assert_eq!(actor.qi, 20.0);
        assert!((actor.next_action_time - 2.1).abs() < 1e-9);
        // built-in struggle: 50 × 40%
        assert_eq!(target.hp, 180);
    }

    #[test]
    fn stunned_actor_only_reports() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut rolls = RollStream::new(&fixture.rng, 0);
        let mut actor = fixture.combatant(Side::Enemy, 50.0, &[Some("iron_fist")]);
        let mut target = fixture.combatant(Side::Player, 0.0, &[]);
        let stun = fixture.statuses.get("stun").unwrap();
        actor.active_effects.apply(stun, 0.0, 10.0, 0.0, Side::Player);
        actor.consecutive_skips = 3;

        let entry = resolve_turn(&mut actor, &mut target, 0.0, &env, &mut rolls).unwrap();
        assert_eq!(entry.kind, LogKind::Stunned);
        assert_eq!(actor.next_action_time, 1.0);
        assert!(resolve_turn(&mut actor, &mut target, 0.5, &env, &mut rolls).is_none());
        assert_eq!(actor.consecutive_skips, 3);
        assert_eq!(actor.current_slot, 0);
        assert_eq!(target.hp, 200);
    }

    #[test]
    fn stun_retry_leaves_last_action_time() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut rolls = RollStream::new(&fixture.rng, 0);
        let mut actor = fixture.combatant(Side::Player, 50.0, &[Some("iron_fist")]);
        let mut target = fixture.combatant(Side::Enemy, 0.0, &[]);
        let stun = fixture.statuses.get("stun").unwrap();
        actor.active_effects.apply(stun, 0.0, 10.0, 0.0, Side::Enemy);

        let entry = resolve_turn(&mut actor, &mut target, 2.0, &env, &mut rolls).unwrap();
        assert_eq!(entry.kind, LogKind::Stunned);
        assert_eq!(actor.next_action_time, 3.0);
        assert_eq!(actor.last_action_time, 0.0);

        resolve_turn(&mut actor, &mut target, 3.0, &env, &mut rolls).unwrap();
        assert_eq!(actor.last_action_time, 0.0);
    }
}
