//! Status effect catalog loader.

use std::path::Path;

use combat_core::StatusEffectDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Status file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusFile {
    pub statuses: Vec<StatusEffectDefinition>,
}

/// Loader for status effect definitions from RON files.
pub struct StatusLoader;

impl StatusLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<StatusEffectDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<StatusEffectDefinition>> {
        let file: StatusFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse status catalog RON: {}", e))?;
        Ok(file.statuses)
    }
}
