//! Player combat data loader.

use std::path::Path;

use combat_core::PlayerCombatData;

use crate::loaders::{LoadResult, read_file};

/// Loader for a single [`PlayerCombatData`] from a RON file.
pub struct PlayerLoader;

impl PlayerLoader {
    pub fn load(path: &Path) -> LoadResult<PlayerCombatData> {
        let content = read_file(path)?;
        ron::from_str(&content).map_err(|e| {
            anyhow::anyhow!(
                "Failed to parse player RON {}: {}",
                path.display(),
                e
            )
        })
    }
}
