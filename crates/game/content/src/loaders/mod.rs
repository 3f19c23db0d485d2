//! Content loaders for reading bout data from files.
//!
//! RON carries catalogs, enemies and players; TOML carries the bout
//! configuration. Every loader also exposes a `parse` entry point so embedded
//! data goes through the same path as files on disk.

pub mod config;
pub mod enemies;
pub mod factory;
pub mod player;
pub mod statuses;
pub mod techniques;

pub use config::ConfigLoader;
pub use enemies::EnemyLoader;
pub use factory::ContentFactory;
pub use player::PlayerLoader;
pub use statuses::StatusLoader;
pub use techniques::TechniqueLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
