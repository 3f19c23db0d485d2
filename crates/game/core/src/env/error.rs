//! Catalog validation errors.
//!
//! Raised while building technique and status catalogs from external data.
//! A constructed catalog is always valid, so the simulation never sees these.

use crate::error::{CombatError, ErrorSeverity};

/// Errors produced when a catalog definition is malformed.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CatalogError {
    /// Two technique definitions share an id.
    #[error("duplicate technique id '{0}'")]
    DuplicateTechnique(String),

    /// Two status definitions share an id.
    #[error("duplicate status effect id '{0}'")]
    DuplicateStatus(String),

    /// A status application would create an already-expired instance.
    #[error("technique '{technique}' applies '{status}' with non-positive duration {duration}")]
    NonPositiveDuration {
        technique: String,
        status: String,
        duration: f64,
    },

    #[error("technique '{technique}' has negative cooldown {cooldown}")]
    NegativeCooldown { technique: String, cooldown: f64 },

    #[error("status '{status}' has negative tick interval {tick_interval}")]
    NegativeTickInterval { status: String, tick_interval: f64 },

    /// A stacking effect must allow at least one instance.
    #[error("stacking status '{0}' has max_stacks = 0")]
    ZeroMaxStacks(String),
}

impl CombatError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use CatalogError::*;
        match self {
            DuplicateTechnique(_) => "CATALOG_DUPLICATE_TECHNIQUE",
            DuplicateStatus(_) => "CATALOG_DUPLICATE_STATUS",
            NonPositiveDuration { .. } => "CATALOG_NON_POSITIVE_DURATION",
            NegativeCooldown { .. } => "CATALOG_NEGATIVE_COOLDOWN",
            NegativeTickInterval { .. } => "CATALOG_NEGATIVE_TICK_INTERVAL",
            ZeroMaxStacks(_) => "CATALOG_ZERO_MAX_STACKS",
        }
    }
}
