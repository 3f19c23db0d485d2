//! Bout event log.
//!
//! Entries are appended in emission order and never mutated. Serialized as
//! `{ time, actor, type, ...payload }` with camelCase payload fields so a
//! client can replay the bout as an animation.

use crate::env::{StatusId, TechniqueId};
use crate::state::Side;

/// Discriminant of a log entry. Consumers must tolerate unknown values.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum LogKind {
    /// Cast with no damage, status, shield or qi outcome.
    Technique,
    Damage,
    Miss,
    EffectApply,
    Shield,
    RestoreQi,
    Struggle,
    Stunned,
    EffectTick,
    EffectExpire,
    Wait,
    Info,
}

/// Outcome of a technique cast, shared by `technique`-family entries.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CastDetail {
    pub technique: TechniqueId,
    pub damage: i64,
    pub heal: i64,
    pub qi_restore: f64,
    pub shield: i64,
    pub missed: bool,
    /// Fallback struggle fired by the skip counter rather than chosen from a slot.
    pub forced: bool,
    pub applied_effects: Vec<StatusId>,
    pub qi_spent: f64,
    pub target_hp: i64,
    pub target_shield: i64,
    pub actor_qi: f64,
}

/// Type-specific payload of a log entry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum LogDetail {
    Cast(CastDetail),
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    Timer { next_action_time: f64 },
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    EffectTick {
        effect_id: StatusId,
        /// Side that applied the ticking status.
        source: Side,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        damage: Option<i64>,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        heal: Option<i64>,
        hp: i64,
    },
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    EffectExpire { effect_id: StatusId },
    Info { message: String },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LogEntry {
    /// Bout time, rounded to one decimal.
    pub time: f64,
    /// `None` for bout-level entries.
    pub actor: Option<Side>,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: LogKind,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub detail: LogDetail,
}

fn round_time(time: f64) -> f64 {
    (time * 10.0).round() / 10.0
}

impl LogEntry {
    pub fn new(time: f64, actor: Option<Side>, kind: LogKind, detail: LogDetail) -> Self {
        Self {
            time: round_time(time),
            actor,
            kind,
            detail,
        }
    }

    pub fn cast(time: f64, actor: Side, kind: LogKind, detail: CastDetail) -> Self {
        Self::new(time, Some(actor), kind, LogDetail::Cast(detail))
    }

    pub fn stunned(time: f64, actor: Side, next_action_time: f64) -> Self {
        Self::new(
            time,
            Some(actor),
            LogKind::Stunned,
            LogDetail::Timer {
                next_action_time: round_time(next_action_time),
            },
        )
    }

    pub fn wait(time: f64, actor: Side, next_action_time: f64) -> Self {
        Self::new(
            time,
            Some(actor),
            LogKind::Wait,
            LogDetail::Timer {
                next_action_time: round_time(next_action_time),
            },
        )
    }

    pub fn effect_expire(time: f64, actor: Side, effect_id: StatusId) -> Self {
        Self::new(
            time,
            Some(actor),
            LogKind::EffectExpire,
            LogDetail::EffectExpire { effect_id },
        )
    }

    pub fn info(time: f64, message: impl Into<String>) -> Self {
        Self::new(
            time,
            None,
            LogKind::Info,
            LogDetail::Info {
                message: message.into(),
            },
        )
    }

    pub fn cast_detail(&self) -> Option<&CastDetail> {
        match &self.detail {
            LogDetail::Cast(detail) => Some(detail),
            _ => None,
        }
    }
}

/// Append-only bout log.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CombatLog {
    entries: Vec<LogEntry>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = LogEntry>) {
        self.entries.extend(entries);
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn last_kind(&self) -> Option<LogKind> {
        self.entries.last().map(|entry| entry.kind)
    }

    pub fn filter_by_kind(&self, kind: LogKind) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |entry| entry.kind == kind)
    }

    pub fn entries_for(&self, side: Side) -> impl Iterator<Item = &LogEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.actor == Some(side))
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}
