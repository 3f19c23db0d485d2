//! Bout configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for bout configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`CombatConfig`] from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.tick_granularity <= 0.0 {
            anyhow::bail!(
                "tick_granularity must be positive, got {}",
                config.tick_granularity
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("max_duration = 300.0\nstruggle_threshold = 3\n").unwrap();
        assert_eq!(config.max_duration, 300.0);
        assert_eq!(config.struggle_threshold, 3);
        assert_eq!(config.tick_granularity, CombatConfig::DEFAULT_TICK_GRANULARITY);
    }

    #[test]
    fn rejects_non_positive_granularity() {
        assert!(ConfigLoader::parse("tick_granularity = 0.0").is_err());
    }
}
