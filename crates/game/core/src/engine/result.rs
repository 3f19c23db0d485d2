//! Bout result and summary.

use super::log::{CombatLog, LogDetail};
use crate::env::Rewards;
use crate::state::{ResourceSnapshot, Side};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum Winner {
    Player,
    Enemy,
    /// Time limit reached with both sides alive.
    Draw,
}

/// Resources of both sides at one point of the bout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoutStats {
    pub player: ResourceSnapshot,
    pub enemy: ResourceSnapshot,
}

/// Complete outcome of one bout.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CombatResult {
    pub winner: Winner,
    pub log: CombatLog,
    /// The enemy's reward table, only when the player won.
    pub rewards: Option<Rewards>,
    pub initial_stats: BoutStats,
    /// HP clamped at zero, qi rounded down; callers persist deltas from these.
    pub final_stats: BoutStats,
    /// Bout time reached when the simulation stopped.
    pub duration: f64,
    /// Seed the bout's rolls were derived from.
    pub seed: u64,
}

/// Per-side tallies derived from the log.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SideSummary {
    /// Direct hits plus ticks of this side's damage-over-time statuses on the
    /// opponent.
    pub damage_dealt: i64,
    pub techniques_used: u32,
    pub struggles: u32,
    pub misses: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BoutSummary {
    pub winner: Winner,
    pub duration: f64,
    pub player: SideSummary,
    pub enemy: SideSummary,
}

impl CombatResult {
    pub fn summary(&self) -> BoutSummary {
        BoutSummary {
            winner: self.winner,
            duration: self.duration,
            player: self.side_summary(Side::Player),
            enemy: self.side_summary(Side::Enemy),
        }
    }

    fn side_summary(&self, side: Side) -> SideSummary {
        let mut summary = SideSummary::default();

        for entry in self.log.entries_for(side) {
            let Some(cast) = entry.cast_detail() else {
                continue;
            };
            summary.damage_dealt += cast.damage;
            if cast.missed {
                summary.misses += 1;
            }
            if cast.forced {
                summary.struggles += 1;
            } else {
                summary.techniques_used += 1;
            }
        }

        summary.damage_dealt += self
            .log
            .entries_for(side.opponent())
            .filter_map(|entry| match &entry.detail {
                LogDetail::EffectTick {
                    source,
                    damage: Some(damage),
                    ..
                } if *source == side => Some(*damage),
                _ => None,
            })
            .sum::<i64>();

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CastDetail, LogEntry, LogKind};
    use crate::env::{StatusId, TechniqueId};

    fn cast(
        time: f64,
        actor: Side,
        kind: LogKind,
        technique: &str,
        damage: i64,
        forced: bool,
    ) -> LogEntry {
        LogEntry::cast(
            time,
            actor,
            kind,
            CastDetail {
                technique: TechniqueId::new(technique),
                damage,
                forced,
                ..CastDetail::default()
            },
        )
    }

    fn tick(time: f64, carrier: Side, source: Side, damage: i64) -> LogEntry {
        LogEntry::new(
            time,
            Some(carrier),
            LogKind::EffectTick,
            LogDetail::EffectTick {
                effect_id: StatusId::new("burn"),
                source,
                damage: Some(damage),
                heal: None,
                hp: 50,
            },
        )
    }

    fn create_test_result(log: CombatLog) -> CombatResult {
        CombatResult {
            winner: Winner::Draw,
            log,
            rewards: None,
            initial_stats: BoutStats::default(),
            final_stats: BoutStats::default(),
            duration: 10.0,
            seed: 0,
        }
    }

    #[test]
    fn equipped_struggle_counts_as_technique() {
        let mut log = CombatLog::new();
        log.push(cast(0.0, Side::Player, LogKind::Damage, "struggle", 20, false));
        log.push(cast(2.0, Side::Player, LogKind::Struggle, "struggle", 20, true));
        log.push(cast(4.0, Side::Player, LogKind::Miss, "struggle", 0, true));

        let summary = create_test_result(log).summary();
        assert_eq!(summary.player.techniques_used, 1);
        assert_eq!(summary.player.struggles, 2);
        assert_eq!(summary.player.damage_dealt, 40);
    }

    #[test]
    fn ticks_are_credited_to_their_caster() {
        let mut log = CombatLog::new();
        // enemy burning itself, then the player's poison on the enemy
        log.push(tick(1.0, Side::Enemy, Side::Enemy, 7));
        log.push(tick(1.0, Side::Enemy, Side::Player, 5));
        log.push(tick(2.0, Side::Player, Side::Enemy, 3));

        let summary = create_test_result(log).summary();
        assert_eq!(summary.player.damage_dealt, 5);
        assert_eq!(summary.enemy.damage_dealt, 3);
    }
}
