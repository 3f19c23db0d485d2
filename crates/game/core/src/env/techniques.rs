//! Technique definitions and the technique catalog.
//!
//! A technique is a catalog-defined action with a qi cost, a cooldown, an
//! optional hit roll, optional direct damage and a list of effect payloads.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use super::error::CatalogError;
use super::statuses::StatusId;
use crate::stats::StatKind;

/// Catalog key of a technique.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TechniqueId(pub String);

impl TechniqueId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TechniqueId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TechniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TechniqueId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Broad category of a technique. Offense techniques always roll to hit.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TechniqueKind {
    #[default]
    Offense,
    Defense,
    Support,
}

/// Who receives a status application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectTarget {
    /// The technique's user.
    User,
    /// The opponent. Suppressed when the hit roll misses.
    #[default]
    Target,
}

/// Parameters of an `ApplyStatus` payload.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusApplication {
    pub status: StatusId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: EffectTarget,
    /// Lifetime of the created instance. Must be positive.
    pub duration: f64,
    /// When present, the stored value is snapshotted from the user's stats.
    #[cfg_attr(feature = "serde", serde(default))]
    pub power: Option<f64>,
    /// Stat used for the snapshot; falls back to the technique's scaling stat.
    #[cfg_attr(feature = "serde", serde(default))]
    pub scaling_stat: Option<StatKind>,
    /// Flat stored value used when `power` is absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: f64,
}

/// One effect carried by a technique.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectPayload {
    /// Adds to the user's damage-absorbing shield.
    Shield { value: i64 },
    /// Restores qi to the user, clamped to max qi.
    RestoreQi { value: f64 },
    /// Restores HP to the user, clamped to max HP.
    Heal { value: i64 },
    /// Creates or refreshes a status instance on the user or the target.
    ApplyStatus(StatusApplication),
}

/// Immutable catalog entry describing a technique.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TechniqueDefinition {
    pub id: TechniqueId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: TechniqueKind,
    /// Time until the user may act again after casting.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub qi_cost_base: f64,
    /// Fraction of the user's max qi added to the cost (0.1 = 10%).
    #[cfg_attr(feature = "serde", serde(default))]
    pub qi_cost_pct: f64,
    /// Damage power in percent of the scaling stat. Zero means no direct damage.
    #[cfg_attr(feature = "serde", serde(default))]
    pub power: f64,
    /// Hit chance before evasion; `None` means 100.
    #[cfg_attr(feature = "serde", serde(default))]
    pub accuracy: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scaling_stat: StatKind,
    /// Delay before the first action when this technique sits in slot 0.
    #[cfg_attr(feature = "serde", serde(default))]
    pub initial_charge: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<EffectPayload>,
}

impl TechniqueDefinition {
    /// Power of the built-in struggle used when the catalog has none.
    pub const FALLBACK_STRUGGLE_POWER: f64 = 40.0;
    /// Cooldown of the built-in struggle used when the catalog has none.
    pub const FALLBACK_STRUGGLE_COOLDOWN: f64 = 2.0;

    /// Offensive techniques roll to hit and may deal direct damage.
    pub fn is_offensive(&self) -> bool {
        self.kind == TechniqueKind::Offense || self.power > 0.0
    }

    /// Qi required to cast for a user with the given max qi.
    pub fn qi_cost(&self, max_qi: f64) -> f64 {
        self.qi_cost_base + self.qi_cost_pct * max_qi
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy.unwrap_or(100.0)
    }

    /// Built-in struggle: a free, weak, always-accurate strength attack.
    pub fn fallback_struggle() -> Self {
        Self {
            id: TechniqueId::new(crate::config::CombatConfig::STRUGGLE_TECHNIQUE_ID),
            name: "Struggle".to_owned(),
            kind: TechniqueKind::Offense,
            cooldown: Self::FALLBACK_STRUGGLE_COOLDOWN,
            qi_cost_base: 0.0,
            qi_cost_pct: 0.0,
            power: Self::FALLBACK_STRUGGLE_POWER,
            accuracy: Some(100.0),
            scaling_stat: StatKind::Strength,
            initial_charge: None,
            effects: Vec::new(),
        }
    }
}

/// Read-only lookup of technique definitions.
pub trait TechniqueOracle: Send + Sync {
    /// Returns the definition for `id`, or `None` when the id is unknown.
    fn technique(&self, id: &str) -> Option<&TechniqueDefinition>;
}

/// Validated, id-keyed table of techniques.
#[derive(Clone, Debug, Default)]
pub struct TechniqueCatalog {
    techniques: BTreeMap<TechniqueId, TechniqueDefinition>,
}

impl TechniqueCatalog {
    /// Builds a catalog, rejecting duplicate ids and malformed definitions.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] for duplicate ids, negative cooldowns or a
    /// status payload whose duration is not positive.
    pub fn new(
        definitions: impl IntoIterator<Item = TechniqueDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut techniques = BTreeMap::new();
        for definition in definitions {
            validate(&definition)?;
            if techniques.contains_key(&definition.id) {
                return Err(CatalogError::DuplicateTechnique(definition.id.0));
            }
            techniques.insert(definition.id.clone(), definition);
        }
        Ok(Self { techniques })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&TechniqueDefinition> {
        self.techniques.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.techniques.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &TechniqueId> {
        self.techniques.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TechniqueDefinition> {
        self.techniques.values()
    }

    pub fn len(&self) -> usize {
        self.techniques.len()
    }

    pub fn is_empty(&self) -> bool {
        self.techniques.is_empty()
    }
}

impl TechniqueOracle for TechniqueCatalog {
    fn technique(&self, id: &str) -> Option<&TechniqueDefinition> {
        self.get(id)
    }
}

fn validate(definition: &TechniqueDefinition) -> Result<(), CatalogError> {
    if definition.cooldown < 0.0 {
        return Err(CatalogError::NegativeCooldown {
            technique: definition.id.0.clone(),
            cooldown: definition.cooldown,
        });
    }
    for payload in &definition.effects {
        if let EffectPayload::ApplyStatus(application) = payload
            && application.duration <= 0.0
        {
            return Err(CatalogError::NonPositiveDuration {
                technique: definition.id.0.clone(),
                status: application.status.0.clone(),
                duration: application.duration,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_technique(id: &str) -> TechniqueDefinition {
        TechniqueDefinition {
            id: TechniqueId::new(id),
            name: id.to_owned(),
            kind: TechniqueKind::Offense,
            cooldown: 3.0,
            qi_cost_base: 5.0,
            qi_cost_pct: 0.1,
            power: 120.0,
            accuracy: None,
            scaling_stat: StatKind::Strength,
            initial_charge: None,
            effects: Vec::new(),
        }
    }

    #[test]
    fn qi_cost_adds_percentage_of_max_qi() {
        let technique = create_test_technique("iron_fist");
        assert!((technique.qi_cost(50.0) - 10.0).abs() < 1e-9);
        assert_eq!(technique.accuracy(), 100.0);
    }

    #[test]
    fn support_with_power_counts_as_offensive() {
        let mut technique = create_test_technique("odd");
        technique.kind = TechniqueKind::Support;
        assert!(technique.is_offensive());
        technique.power = 0.0;
        assert!(!technique.is_offensive());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = TechniqueCatalog::new([
            create_test_technique("iron_fist"),
            create_test_technique("iron_fist"),
        ]);
        assert_eq!(
            result.unwrap_err(),
            CatalogError::DuplicateTechnique("iron_fist".into())
        );
    }

    #[test]
    fn rejects_zero_duration_status() {
        let mut technique = create_test_technique("venom_needle");
        technique.effects.push(EffectPayload::ApplyStatus(StatusApplication {
            status: StatusId::new("poison"),
            target: EffectTarget::Target,
            duration: 0.0,
            power: None,
            scaling_stat: None,
            value: 5.0,
        }));
        assert!(matches!(
            TechniqueCatalog::new([technique]),
            Err(CatalogError::NonPositiveDuration { .. })
        ));
    }

    #[test]
    fn lookup_by_str() {
        let catalog = TechniqueCatalog::new([create_test_technique("iron_fist")]).unwrap();
        assert!(catalog.technique("iron_fist").is_some());
        assert!(catalog.technique("missing").is_none());
        assert_eq!(catalog.len(), 1);
    }
}
