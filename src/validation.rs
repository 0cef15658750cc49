//! Consistency checks on a progress triple.
//!
//! Run after derivation: whatever the deriver could not reconcile ends up
//! here as a [`ValidationError`] on the offending attribute.

use progress_common::calculator::{compute_percent_complete, is_percent_complete_correctable};
use progress_common::{ProgressMode, ProgressValues};
use rust_decimal::Decimal;

use crate::errors::ValidationError;

/// Validate `values` for `mode`. An empty result means the values are valid.
pub fn validate(mode: ProgressMode, values: &ProgressValues) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if values.work.is_some_and(|w| w < Decimal::ZERO) {
        errors.push(ValidationError::WorkNegative);
    }

    if values.remaining_work.is_some_and(|r| r < Decimal::ZERO) {
        errors.push(ValidationError::RemainingWorkNegative);
    }

    if let (Some(work), Some(remaining_work)) = (values.work, values.remaining_work)
        && remaining_work > work
    {
        errors.push(ValidationError::RemainingWorkExceedsWork);
    }

    if let Some(value) = values.percent_complete
        && !(0..=100).contains(&value)
    {
        errors.push(ValidationError::PercentCompleteOutOfRange { value });
    }

    if mode == ProgressMode::WorkBased {
        validate_work_based(values, &mut errors);
    }

    errors
}

fn validate_work_based(values: &ProgressValues, errors: &mut Vec<ValidationError>) {
    if values.remaining_work.is_some() && values.work.is_none() {
        errors.push(ValidationError::WorkRequiredForRemainingWork);
    }

    if values.percent_complete == Some(100)
        && values.remaining_work.is_some_and(|r| !r.is_zero())
    {
        errors.push(ValidationError::RemainingWorkMustBeZero);
    }

    if is_percent_complete_correctable(ProgressMode::WorkBased, values)
        && let (Some(work), Some(remaining_work)) = (values.work, values.remaining_work)
        && let Ok(expected) = compute_percent_complete(work, remaining_work)
    {
        errors.push(ValidationError::PercentCompleteMismatch { expected });
    }
}
