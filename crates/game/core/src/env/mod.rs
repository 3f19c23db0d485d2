//! Traits describing read-only bout data.
//!
//! Oracles expose technique and status catalogs plus the random source. The
//! [`Env`] aggregate bundles them with the [`CombatConfig`] so the engine can
//! reach everything it needs without coupling to concrete implementations.
mod enemies;
mod error;
mod rng;
mod statuses;
mod techniques;

pub use enemies::{EnemyDefinition, Rewards};
pub use error::CatalogError;
pub use rng::{FixedRng, PcgRng, RngOracle, RollStream, compute_seed};
pub use statuses::{
    ModTarget, StatModifier, StatusEffectCatalog, StatusEffectDefinition, StatusId, StatusKind,
    StatusOracle,
};
pub use techniques::{
    EffectPayload, EffectTarget, StatusApplication, TechniqueCatalog, TechniqueDefinition,
    TechniqueId, TechniqueKind, TechniqueOracle,
};

use crate::config::CombatConfig;

/// Aggregates the read-only oracles and tunables used by a bout.
pub struct Env<'a, T, S, R>
where
    T: TechniqueOracle + ?Sized,
    S: StatusOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    techniques: &'a T,
    statuses: &'a S,
    rng: &'a R,
    config: &'a CombatConfig,
}

pub type CombatEnv<'a> =
    Env<'a, dyn TechniqueOracle + 'a, dyn StatusOracle + 'a, dyn RngOracle + 'a>;

// Manual impls: derives would require `T: Clone` on unsized oracles.
impl<T, S, R> Clone for Env<'_, T, S, R>
where
    T: TechniqueOracle + ?Sized,
    S: StatusOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S, R> Copy for Env<'_, T, S, R>
where
    T: TechniqueOracle + ?Sized,
    S: StatusOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

impl<'a, T, S, R> Env<'a, T, S, R>
where
    T: TechniqueOracle + ?Sized,
    S: StatusOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(techniques: &'a T, statuses: &'a S, rng: &'a R, config: &'a CombatConfig) -> Self {
        Self {
            techniques,
            statuses,
            rng,
            config,
        }
    }

    pub fn techniques(&self) -> &'a T {
        self.techniques
    }

    pub fn statuses(&self) -> &'a S {
        self.statuses
    }

    pub fn rng(&self) -> &'a R {
        self.rng
    }

    pub fn config(&self) -> &'a CombatConfig {
        self.config
    }
}

impl<'a, T, S, R> Env<'a, T, S, R>
where
    T: TechniqueOracle + 'a,
    S: StatusOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into the trait-object based [`CombatEnv`].
    pub fn into_combat_env(self) -> CombatEnv<'a> {
        let techniques: &'a dyn TechniqueOracle = self.techniques;
        let statuses: &'a dyn StatusOracle = self.statuses;
        let rng: &'a dyn RngOracle = self.rng;
        Env::new(techniques, statuses, rng, self.config)
    }
}
