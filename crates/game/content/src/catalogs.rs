//! Validated catalogs and the enemy roster.
//!
//! The embedded defaults are compiled in from `data/` so the `bout` binary
//! works without a data directory.

use std::collections::BTreeMap;

use combat_core::{
    CombatConfig, CombatEnv, EnemyDefinition, Env, RngOracle, StatusEffectCatalog,
    StatusEffectDefinition, StatusOracle, TechniqueCatalog, TechniqueDefinition, TechniqueOracle,
};
use tracing::warn;

use crate::loaders::{ConfigLoader, EnemyLoader, LoadResult, StatusLoader, TechniqueLoader};

const BUILTIN_TECHNIQUES: &str = include_str!("../data/techniques.ron");
const BUILTIN_STATUSES: &str = include_str!("../data/statuses.ron");
const BUILTIN_ENEMIES: &str = include_str!("../data/enemies.ron");
const BUILTIN_CONFIG: &str = include_str!("../data/config.toml");

/// Technique and status catalogs, built once and shared by every bout.
#[derive(Clone, Debug, Default)]
pub struct Catalogs {
    pub techniques: TechniqueCatalog,
    pub statuses: StatusEffectCatalog,
}

impl Catalogs {
    /// Validate definitions into catalogs.
    ///
    /// Status payloads naming unknown statuses are accepted (the engine skips
    /// them) but reported with a warning.
    pub fn from_definitions(
        techniques: Vec<TechniqueDefinition>,
        statuses: Vec<StatusEffectDefinition>,
    ) -> LoadResult<Self> {
        let techniques = TechniqueCatalog::new(techniques)
            .map_err(|e| anyhow::anyhow!("Invalid technique catalog: {}", e))?;
        let statuses = StatusEffectCatalog::new(statuses)
            .map_err(|e| anyhow::anyhow!("Invalid status catalog: {}", e))?;

        for technique in techniques.iter() {
            for payload in &technique.effects {
                if let combat_core::EffectPayload::ApplyStatus(application) = payload
                    && statuses.get(application.status.as_str()).is_none()
                {
                    warn!(
                        technique = %technique.id,
                        status = %application.status,
                        "technique applies an unknown status"
                    );
                }
            }
        }

        Ok(Self {
            techniques,
            statuses,
        })
    }

    /// Catalogs compiled into the crate.
    pub fn builtin() -> LoadResult<Self> {
        Self::from_definitions(
            TechniqueLoader::parse(BUILTIN_TECHNIQUES)?,
            StatusLoader::parse(BUILTIN_STATUSES)?,
        )
    }

    /// Bundle these catalogs with a random source and config for the engine.
    pub fn env<'a>(&'a self, rng: &'a dyn RngOracle, config: &'a CombatConfig) -> CombatEnv<'a> {
        let techniques: &'a dyn TechniqueOracle = &self.techniques;
        let statuses: &'a dyn StatusOracle = &self.statuses;
        Env::new(techniques, statuses, rng, config)
    }
}

/// Bout configuration compiled into the crate.
pub fn builtin_config() -> LoadResult<CombatConfig> {
    ConfigLoader::parse(BUILTIN_CONFIG)
}

/// Enemies keyed by id.
#[derive(Clone, Debug, Default)]
pub struct EnemyRoster {
    enemies: BTreeMap<String, EnemyDefinition>,
}

impl EnemyRoster {
    /// Build a roster, rejecting duplicate ids.
    pub fn from_definitions(definitions: Vec<EnemyDefinition>) -> LoadResult<Self> {
        let mut enemies = BTreeMap::new();
        for enemy in definitions {
            if enemies.contains_key(&enemy.id) {
                anyhow::bail!("Duplicate enemy id '{}'", enemy.id);
            }
            enemies.insert(enemy.id.clone(), enemy);
        }
        Ok(Self { enemies })
    }

    /// Enemies compiled into the crate.
    pub fn builtin() -> LoadResult<Self> {
        Self::from_definitions(EnemyLoader::parse(BUILTIN_ENEMIES)?)
    }

    pub fn get(&self, id: &str) -> Option<&EnemyDefinition> {
        self.enemies.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.enemies.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnemyDefinition> {
        self.enemies.values()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_enemy_ids_are_rejected() {
        let enemies = EnemyLoader::parse(
            r#"(enemies: [
                (id: "rat", name: "Rat", stats: (max_hp: 5)),
                (id: "rat", name: "Big Rat", stats: (max_hp: 9)),
            ])"#,
        )
        .unwrap();
        let error = EnemyRoster::from_definitions(enemies).unwrap_err();
        assert!(error.to_string().contains("rat"));
    }

    #[test]
    fn invalid_catalog_is_reported() {
        let techniques = TechniqueLoader::parse(
            r#"(techniques: [
                (id: "iron_fist", power: 120.0),
                (id: "iron_fist", power: 60.0),
            ])"#,
        )
        .unwrap();
        let error = Catalogs::from_definitions(techniques, Vec::new()).unwrap_err();
        assert!(error.to_string().contains("duplicate technique id 'iron_fist'"));
    }
}
