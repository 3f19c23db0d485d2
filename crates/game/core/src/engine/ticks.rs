//! Per-tick status processing: expiry first, then periodic damage and heals.

use super::log::{LogDetail, LogEntry, LogKind};
use crate::combat::{apply_damage, mitigation_ratio};
use crate::config::time_reached;
use crate::env::{CombatEnv, StatusId, StatusKind};
use crate::state::{CombatantState, Side};

/// Expire and tick `entity`'s active effects at `now`.
///
/// DoT magnitudes were snapshotted from the caster at cast time but are
/// mitigated by the carrier's defense as it is now.
pub fn process_status_ticks(
    entity: &mut CombatantState,
    now: f64,
    env: &CombatEnv<'_>,
) -> Vec<LogEntry> {
    let statuses = env.statuses();
    let mut entries = Vec::new();

    let expired = entity.active_effects.remove_expired(now);
    if !expired.is_empty() {
        entity.recalc_derived_stats(statuses);
        entries.extend(
            expired
                .into_iter()
                .map(|effect_id| LogEntry::effect_expire(now, entity.side, effect_id)),
        );
    }

    let mut due: Vec<(StatusId, StatusKind, f64, Side)> = Vec::new();
    for instance in entity.active_effects.iter_mut() {
        let Some(definition) = statuses.status(instance.effect_id.as_str()) else {
            continue;
        };
        if !definition.ticks() || !time_reached(now, instance.next_tick_time) {
            continue;
        }
        // keep the original cadence
        instance.next_tick_time += definition.tick_interval;
        due.push((
            instance.effect_id.clone(),
            definition.kind,
            instance.stored_value,
            instance.source,
        ));
    }

    for (effect_id, kind, stored_value, source) in due {
        match kind {
            StatusKind::Dot => {
                let defense = entity.derived_stats.defense as f64;
                let mitigated = stored_value * mitigation_ratio(stored_value, defense);
                let damage = (mitigated.floor() as i64).max(1);
                apply_damage(entity, damage);
                entries.push(tick_entry(now, entity, effect_id, source, Some(damage), None));
            }
            StatusKind::Hot => {
                let heal = (stored_value.floor() as i64).max(0);
                entity.heal(heal);
                entries.push(tick_entry(now, entity, effect_id, source, None, Some(heal)));
            }
            StatusKind::StatMod | StatusKind::Control => {}
        }
    }

    entries
}

fn tick_entry(
    now: f64,
    entity: &CombatantState,
    effect_id: StatusId,
    source: Side,
    damage: Option<i64>,
    heal: Option<i64>,
) -> LogEntry {
    LogEntry::new(
        now,
        Some(entity.side),
        LogKind::EffectTick,
        LogDetail::EffectTick {
            effect_id,
            source,
            damage,
            heal,
            hp: entity.hp.max(0),
        },
    )
}
