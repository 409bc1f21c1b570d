//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (e.g. [`crate::action::ActionError`]) are defined next
//! to the actions they validate. This module provides the shared
//! classification every error in the crate reports.
//!
//! # Design Principles
//!
//! - **Policy, not faults**: every rejection leaves the battle state untouched
//! - **Two categories**: callers only need to tell an illegal transition from
//!   an invalid target
//! - **Stable codes**: `error_code()` is suitable for logs and tests

/// Category of a rejected action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// The action does not match the current state (wrong turn, wrong phase,
    /// missing prior selection, battle already over).
    IllegalTransition,

    /// The selected character cannot be targeted (defeated or no such slot).
    InvalidTarget,
}

impl ErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::IllegalTransition => "illegal_transition",
            Self::InvalidTarget => "invalid_target",
        }
    }
}

/// Severity level of an error, used for logging priorities.
///
/// - **Recoverable**: the caller may retry once the state moves on
/// - **Validation**: the input itself is wrong and should not be retried as-is
/// - **Internal**: state or configuration inconsistency worth investigating
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Can succeed later (e.g. acting while the previous hit resolves).
    Recoverable,

    /// Invalid input (e.g. defeated target, slot out of range).
    Validation,

    /// Unexpected inconsistency (e.g. a character without attack stats while
    /// the battle is configured for per-character attacks).
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Rejection category.
    fn kind(&self) -> ErrorKind;

    /// Severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
