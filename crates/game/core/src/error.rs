//! Common error infrastructure for combat-core.
//!
//! The simulation itself never fails: absent stats default to zero and unknown
//! catalog ids are no-ops. Errors only arise while building catalogs from
//! external data, and each error enum lives next to the types it validates.

/// Severity level of an error, used for categorization by callers.
///
/// Only catalog validation can fail today, so validation is the sole level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, should not retry without changes.
    ///
    /// Examples: duplicate technique id, zero-duration status application
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
        }
    }
}

/// Common interface for all combat-core errors.
///
/// Gives callers a uniform way to classify errors and map them to stable codes
/// for logs or tooling without matching on every concrete enum.
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a stable error code for this error variant.
    ///
    /// Format: `CATEGORY_SPECIFIC_ERROR`
    fn error_code(&self) -> &'static str;
}
