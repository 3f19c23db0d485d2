//! Subcommand implementations.

mod catalog;
mod simulate;

pub use catalog::Catalog;
pub use simulate::Simulate;

use std::path::Path;

use anyhow::Result;
use combat_content::{Catalogs, ContentFactory, EnemyRoster, builtin_config};
use combat_core::CombatConfig;
use tracing::debug;

/// Everything a bout needs besides the two combatants.
pub struct Content {
    pub catalogs: Catalogs,
    pub roster: EnemyRoster,
    pub config: CombatConfig,
}

impl Content {
    /// Load from `data_dir`, or the embedded content when none is given.
    pub fn load(data_dir: Option<&Path>) -> Result<Self> {
        match data_dir {
            Some(dir) => {
                debug!(data_dir = %dir.display(), "loading content from directory");
                let factory = ContentFactory::new(dir);
                Ok(Self {
                    catalogs: factory.load_catalogs()?,
                    roster: factory.load_roster()?,
                    config: factory.load_config()?,
                })
            }
            None => {
                debug!("using embedded content");
                Ok(Self {
                    catalogs: Catalogs::builtin()?,
                    roster: EnemyRoster::builtin()?,
                    config: builtin_config()?,
                })
            }
        }
    }
}
