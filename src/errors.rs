//! Typed error hierarchy for the progress engine.
//!
//! One enum per subsystem:
//! - `DeriveError`: attribute derivation workflow
//! - `ValidationError`: consistency checks on a progress triple
//! - `DurationError`: parsing human duration input
//! - `RollupError`: hierarchy totals

use progress_common::{CalculationError, ProgressField, ProgressMode};
use thiserror::Error;

/// Errors from deriving progress values after a change.
#[derive(Debug, Error)]
pub enum DeriveError {
    #[error("{field} cannot be set in {mode} mode")]
    ReadOnlyField {
        field: ProgressField,
        mode: ProgressMode,
    },

    #[error("A status is required to derive progress in status_based mode")]
    MissingStatus,

    #[error(transparent)]
    Calculation(#[from] CalculationError),
}

/// A consistency problem with a progress triple.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Work must be greater than or equal to 0")]
    WorkNegative,

    #[error("Remaining work must be greater than or equal to 0")]
    RemainingWorkNegative,

    #[error("Remaining work cannot be greater than work")]
    RemainingWorkExceedsWork,

    #[error("% complete must be between 0 and 100, got {value}")]
    PercentCompleteOutOfRange { value: i32 },

    #[error("Work must be set when remaining work is set")]
    WorkRequiredForRemainingWork,

    #[error("Remaining work must be 0 when % complete is 100")]
    RemainingWorkMustBeZero,

    #[error("% complete does not match work and remaining work (expected {expected})")]
    PercentCompleteMismatch { expected: i32 },
}

impl ValidationError {
    /// The attribute the error is reported on.
    pub fn field(&self) -> ProgressField {
        match self {
            ValidationError::WorkNegative | ValidationError::WorkRequiredForRemainingWork => {
                ProgressField::Work
            }
            ValidationError::RemainingWorkNegative
            | ValidationError::RemainingWorkExceedsWork
            | ValidationError::RemainingWorkMustBeZero => ProgressField::RemainingWork,
            ValidationError::PercentCompleteOutOfRange { .. }
            | ValidationError::PercentCompleteMismatch { .. } => ProgressField::PercentComplete,
        }
    }
}

/// Errors from parsing a duration string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("Duration is empty")]
    Empty,

    #[error("Invalid duration '{input}'. Examples: 8, 1.5h, 1d 4h, 30m")]
    InvalidFormat { input: String },

    #[error("Unknown duration unit '{unit}'. Valid units: w, d, h, m")]
    UnknownUnit { unit: String },

    #[error("Duration '{input}' is too large")]
    OutOfRange { input: String },
}

/// Errors from computing hierarchy totals.
#[derive(Debug, Error)]
pub enum RollupError {
    #[error("Work package {id} has unknown status '{status}'")]
    UnknownStatus { id: u64, status: String },

    #[error("Work package {id} appears more than once in the hierarchy")]
    DuplicateId { id: u64 },

    #[error("Totals for work package {id} are too large")]
    TotalOutOfRange { id: u64 },
}
