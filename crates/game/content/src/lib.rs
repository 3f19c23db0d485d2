//! Data-driven content for the combat engine.
//!
//! This crate houses the default content and loaders for RON/TOML data files:
//! - Technique catalog (RON)
//! - Status effect catalog (RON)
//! - Enemy roster (RON)
//! - Player combat data (RON)
//! - Bout configuration (TOML)
//!
//! All loaders deserialize combat-core types directly with serde.

#[cfg(feature = "loaders")]
pub mod catalogs;
#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use catalogs::{Catalogs, EnemyRoster, builtin_config};
#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, EnemyLoader, LoadResult, PlayerLoader, StatusLoader,
    TechniqueLoader,
};
