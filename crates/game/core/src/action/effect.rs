//! Technique effect application.
//!
//! A cast resolves in three steps:
//!
//! 1. Offensive techniques roll to hit; a miss suppresses every
//!    target-directed payload while self-directed ones still apply.
//! 2. Payloads apply in definition order.
//! 3. Direct damage lands last when the technique has power and hit.

use tracing::debug;

use crate::combat::{accuracy_check, apply_damage, buff_multiplier, compute_damage};
use crate::engine::LogKind;
use crate::env::{
    CombatEnv, EffectPayload, EffectTarget, RollStream, StatusApplication, StatusId,
    TechniqueDefinition,
};
use crate::state::CombatantState;

/// Everything a single cast did, used to build its log entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TechniqueOutcome {
    pub damage: i64,
    pub heal: i64,
    pub qi_restore: f64,
    pub shield: i64,
    pub missed: bool,
    pub applied_effects: Vec<StatusId>,
}

impl TechniqueOutcome {
    /// Log type by priority: miss, damage, effect_apply, shield, restore_qi.
    pub fn log_kind(&self) -> LogKind {
        if self.missed {
            LogKind::Miss
        } else if self.damage > 0 {
            LogKind::Damage
        } else if !self.applied_effects.is_empty() {
            LogKind::EffectApply
        } else if self.shield > 0 {
            LogKind::Shield
        } else if self.qi_restore > 0.0 {
            LogKind::RestoreQi
        } else {
            LogKind::Technique
        }
    }
}

/// Apply `technique` cast by `user` on `target` at `now`.
///
/// Unknown status ids in payloads are skipped.
pub fn apply_technique_effect(
    technique: &TechniqueDefinition,
    user: &mut CombatantState,
    target: &mut CombatantState,
    now: f64,
    env: &CombatEnv<'_>,
    rolls: &mut RollStream<'_>,
) -> TechniqueOutcome {
    let mut outcome = TechniqueOutcome::default();

    if technique.is_offensive() {
        let roll = rolls.roll_percent(user.side.index(), RollStream::HIT_CONTEXT);
        outcome.missed = !accuracy_check(technique, &target.derived_stats, roll);
    }

    for payload in &technique.effects {
        match payload {
            EffectPayload::Shield { value } => {
                let value = (*value).max(0);
                user.shield += value;
                outcome.shield += value;
            }
            EffectPayload::RestoreQi { value } => {
                user.restore_qi(*value);
                outcome.qi_restore += value;
            }
            EffectPayload::Heal { value } => {
                outcome.heal += user.heal(*value);
            }
            EffectPayload::ApplyStatus(application) => {
                if application.target == EffectTarget::Target && outcome.missed {
                    continue;
                }
                if apply_status(technique, application, user, target, now, env) {
                    outcome.applied_effects.push(application.status.clone());
                }
            }
        }
    }

    if technique.power > 0.0 && !outcome.missed {
        let damage = compute_damage(user, target, technique, env.statuses());
        apply_damage(target, damage);
        outcome.damage = damage;
    }

    outcome
}

/// Returns false when the status id is unknown.
fn apply_status(
    technique: &TechniqueDefinition,
    application: &StatusApplication,
    user: &mut CombatantState,
    target: &mut CombatantState,
    now: f64,
    env: &CombatEnv<'_>,
) -> bool {
    let statuses = env.statuses();
    let Some(definition) = statuses.status(application.status.as_str()) else {
        debug!(
            technique = %technique.id,
            status = %application.status,
            "ignoring unknown status"
        );
        return false;
    };

    // Snapshot at cast time; later buffs or debuffs on the caster do not change it.
    let stored_value = match application.power {
        Some(power) => {
            let stat = application.scaling_stat.unwrap_or(technique.scaling_stat);
            user.derived_stats.get(stat) as f64 * power / 100.0
                * buff_multiplier(user, None, statuses)
        }
        None => application.value,
    };

    let source = user.side;
    let recipient = match application.target {
        EffectTarget::User => user,
        EffectTarget::Target => target,
    };
    recipient
        .active_effects
        .apply(definition, now, application.duration, stored_value, source);
    recipient.recalc_derived_stats(statuses);
    true
}
