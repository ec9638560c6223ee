//! Common error infrastructure for tactics-core.
//!
//! Domain errors (`OrderQueueError`, `PhaseError`) live next to the types
//! they protect. This module only provides the shared classification.
//!
//! Most illegal player input never becomes an error at all: commits are
//! checked before they are built and silently dropped when they fail. The
//! errors here cover the invariants that must never break, and are mostly
//! `Fatal`.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Request not applicable right now; dropping it is the correct handling.
    ///
    /// Examples: transition not legal from the current phase
    Recoverable,

    /// Invalid input that should not be retried unchanged.
    ///
    /// Examples: unknown unit id
    Validation,

    /// Unexpected state inconsistency that indicates a bug.
    Internal,

    /// Turn resolution can no longer be trusted.
    ///
    /// Examples: enqueue after the one-shot sort, duplicate live order
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all tactics-core errors.
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant, for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
