//! Enemy definition loader.

use std::path::Path;

use combat_core::EnemyDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Enemy file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyFile {
    pub enemies: Vec<EnemyDefinition>,
}

/// Loader for enemy definitions from RON files.
///
/// A loadout longer than five techniques is rejected at parse time.
pub struct EnemyLoader;

impl EnemyLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<EnemyDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<EnemyDefinition>> {
        let file: EnemyFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;
        Ok(file.enemies)
    }
}
