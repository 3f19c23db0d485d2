//! Status effect definitions and the status catalog.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use super::error::CatalogError;
use crate::stats::StatKind;

/// Catalog key of a status effect.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StatusId(pub String);

impl StatusId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StatusId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StatusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StatusId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Behaviour of a status effect while it is active.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusKind {
    /// Damage over time.
    Dot,
    /// Heal over time.
    Hot,
    /// Passive stat modification.
    StatMod,
    /// Crowd control; usually paired with `can_act = false`.
    Control,
}

/// What a [`StatModifier`] changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModTarget {
    /// Flat delta to a core stat.
    Flat(StatKind),
    /// Percentage delta to a core stat, summed and applied after flat deltas.
    Percent(StatKind),
    /// Percentage added to outgoing damage of the carrier.
    DamagePct,
    /// Percentage added to damage the carrier receives.
    IncomingDamagePct,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    pub target: ModTarget,
    pub value: f64,
}

/// Immutable catalog entry describing a status effect.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffectDefinition {
    pub id: StatusId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub kind: StatusKind,
    /// Time between periodic ticks; zero disables ticking.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tick_interval: f64,
    /// Stacking effects keep independent instances up to `max_stacks`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub can_stack: bool,
    #[cfg_attr(feature = "serde", serde(default = "default_max_stacks"))]
    pub max_stacks: u32,
    /// When false the carrier is stunned.
    #[cfg_attr(feature = "serde", serde(default = "default_can_act"))]
    pub can_act: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stat_mod: Vec<StatModifier>,
}

#[cfg(feature = "serde")]
fn default_max_stacks() -> u32 {
    1
}

#[cfg(feature = "serde")]
fn default_can_act() -> bool {
    true
}

impl StatusEffectDefinition {
    /// Effective instance cap for this definition.
    pub fn stack_limit(&self) -> usize {
        if self.can_stack {
            self.max_stacks as usize
        } else {
            1
        }
    }

    pub fn ticks(&self) -> bool {
        self.tick_interval > 0.0
    }
}

/// Read-only lookup of status effect definitions.
pub trait StatusOracle: Send + Sync {
    /// Returns the definition for `id`, or `None` when the id is unknown.
    fn status(&self, id: &str) -> Option<&StatusEffectDefinition>;
}

/// Validated, id-keyed table of status effects.
#[derive(Clone, Debug, Default)]
pub struct StatusEffectCatalog {
    statuses: BTreeMap<StatusId, StatusEffectDefinition>,
}

impl StatusEffectCatalog {
    /// Builds a catalog, rejecting duplicate ids and malformed definitions.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] for duplicate ids, a negative tick interval or a
    /// stacking effect whose `max_stacks` is zero.
    pub fn new(
        definitions: impl IntoIterator<Item = StatusEffectDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut statuses = BTreeMap::new();
        for definition in definitions {
            if definition.tick_interval < 0.0 {
                return Err(CatalogError::NegativeTickInterval {
                    status: definition.id.0,
                    tick_interval: definition.tick_interval,
                });
            }
            if definition.can_stack && definition.max_stacks == 0 {
                return Err(CatalogError::ZeroMaxStacks(definition.id.0));
            }
            if statuses.contains_key(&definition.id) {
                return Err(CatalogError::DuplicateStatus(definition.id.0));
            }
            statuses.insert(definition.id.clone(), definition);
        }
        Ok(Self { statuses })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&StatusEffectDefinition> {
        self.statuses.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &StatusId> {
        self.statuses.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffectDefinition> {
        self.statuses.values()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

impl StatusOracle for StatusEffectCatalog {
    fn status(&self, id: &str) -> Option<&StatusEffectDefinition> {
        self.get(id)
    }
}
