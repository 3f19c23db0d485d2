//! Content factory for building catalogs from a data directory.

use std::path::{Path, PathBuf};

use combat_core::{CombatConfig, EnemyDefinition, StatusEffectDefinition, TechniqueDefinition};
use tracing::debug;

use crate::catalogs::{Catalogs, EnemyRoster};
use crate::loaders::{ConfigLoader, EnemyLoader, LoadResult, StatusLoader, TechniqueLoader};

/// Content factory that loads all bout content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── techniques.ron
/// ├── statuses.ron
/// └── enemies.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load bout configuration from `config.toml`, or defaults when absent.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load technique definitions from `techniques.ron`.
    pub fn load_techniques(&self) -> LoadResult<Vec<TechniqueDefinition>> {
        TechniqueLoader::load(&self.data_dir.join("techniques.ron"))
    }

    /// Load status effect definitions from `statuses.ron`.
    pub fn load_statuses(&self) -> LoadResult<Vec<StatusEffectDefinition>> {
        StatusLoader::load(&self.data_dir.join("statuses.ron"))
    }

    /// Load enemy definitions from `enemies.ron`.
    pub fn load_enemies(&self) -> LoadResult<Vec<EnemyDefinition>> {
        EnemyLoader::load(&self.data_dir.join("enemies.ron"))
    }

    /// Load and validate both catalogs.
    pub fn load_catalogs(&self) -> LoadResult<Catalogs> {
        let catalogs = Catalogs::from_definitions(self.load_techniques()?, self.load_statuses()?)?;
        debug!(
            data_dir = %self.data_dir.display(),
            techniques = catalogs.techniques.len(),
            statuses = catalogs.statuses.len(),
            "loaded catalogs"
        );
        Ok(catalogs)
    }

    /// Load the enemy roster from `enemies.ron`.
    pub fn load_roster(&self) -> LoadResult<EnemyRoster> {
        EnemyRoster::from_definitions(self.load_enemies()?)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ContentFactory::new(dir.path()).load_config().unwrap();
        assert_eq!(config, CombatConfig::default());
    }

    #[test]
    fn missing_catalog_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let error = ContentFactory::new(dir.path()).load_catalogs().unwrap_err();
        assert!(error.to_string().contains("techniques.ron"));
    }
}
