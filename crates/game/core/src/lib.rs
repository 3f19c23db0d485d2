//! Deterministic PvE qi combat engine.
//!
//! `combat-core` simulates a full bout between a player and an enemy from
//! pre-resolved stats, technique loadouts and read-only catalogs, and returns
//! the winner with a replayable event log. It performs no I/O; catalogs, the
//! random source and tunables are injected through [`env::CombatEnv`], and all
//! bouts run through [`engine::simulate_combat`].
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod stats;

pub use action::{TechniqueOutcome, TurnPhase, apply_technique_effect, resolve_turn};
pub use combat::{accuracy_check, apply_damage, buff_multiplier, compute_damage, mitigation_ratio};
pub use config::CombatConfig;
pub use engine::{
    BoutStats, BoutSummary, CombatEngine, CombatLog, CombatResult, LogEntry, LogKind,
    SideSummary, Winner, process_status_ticks, simulate_combat,
};
pub use env::{
    CatalogError, CombatEnv, EffectPayload, EnemyDefinition, Env, FixedRng, PcgRng, Rewards,
    RngOracle, StatusEffectCatalog, StatusEffectDefinition, StatusId, StatusOracle,
    TechniqueCatalog, TechniqueDefinition, TechniqueId, TechniqueOracle,
};
pub use error::{CombatError, ErrorSeverity};
pub use state::{
    ActiveEffects, CombatantState, EffectInstance, Loadout, PlayerCombatData, ResourceSnapshot,
    Side,
};
pub use stats::{CombatStats, CoreStats, StatKind};
