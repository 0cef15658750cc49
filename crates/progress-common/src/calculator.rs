//! Stateless progress calculator.
//!
//! Converts between work, remaining work and % complete, and decides which
//! stored value is wrong (and safe to silently overwrite) when the three
//! disagree. All hour values are rounded to 2 dp and percentages to whole
//! numbers, both with `MidpointAwayFromZero`.
//!
//! Percentages are reported asymmetrically at the edges: any completed work
//! reports at least 1%, and anything short of fully done reports at most 99%.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::mode::ProgressMode;
use crate::values::{ProgressValues, round_hours};

/// Errors from the conversion functions.
///
/// Only raised for degenerate inputs callers are expected to exclude with the
/// applicability predicates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculationError {
    #[error("{operation}: division by zero (work is 0 or % complete is 100)")]
    DivisionUndefined { operation: &'static str },

    #[error("{operation}: result out of range")]
    OutOfRange { operation: &'static str },
}

/// Derive work from remaining work and % complete.
///
/// `percent_complete` must not be 100; the result is not clamped.
pub fn compute_work(remaining_work: Decimal, percent_complete: i32) -> Result<Decimal, CalculationError> {
    let remaining_fraction = Decimal::ONE - Decimal::from(percent_complete) / Decimal::ONE_HUNDRED;
    if remaining_fraction.is_zero() {
        return Err(CalculationError::DivisionUndefined {
            operation: "compute_work",
        });
    }
    let work = remaining_work
        .checked_div(remaining_fraction)
        .ok_or(CalculationError::OutOfRange {
            operation: "compute_work",
        })?;
    Ok(round_hours(work))
}

/// Derive remaining work from work and % complete, clamped to `[0, work]`.
///
/// `percent_complete` is clamped to `0..=100` first, so the remaining
/// fraction stays within `[0, 1]` and the product never exceeds `work`.
pub fn compute_remaining_work(work: Decimal, percent_complete: i32) -> Decimal {
    let percent_complete = percent_complete.clamp(0, 100);
    let remaining_fraction = Decimal::ONE - Decimal::from(percent_complete) / Decimal::ONE_HUNDRED;
    let remaining_work = round_hours(work * remaining_fraction);
    remaining_work.min(work).max(Decimal::ZERO)
}

/// Derive % complete from work and remaining work.
///
/// Both inputs are rounded to 2 dp before dividing; a `work` that rounds to
/// zero is rejected.
pub fn compute_percent_complete(
    work: Decimal,
    remaining_work: Decimal,
) -> Result<i32, CalculationError> {
    let work = round_hours(work);
    let remaining_work = round_hours(remaining_work);
    if work.is_zero() {
        return Err(CalculationError::DivisionUndefined {
            operation: "compute_percent_complete",
        });
    }
    let out_of_range = CalculationError::OutOfRange {
        operation: "compute_percent_complete",
    };
    let percentage = work
        .checked_sub(remaining_work)
        .and_then(|completed_work| completed_work.checked_div(work))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or(out_of_range.clone())?;

    let ninety_nine = Decimal::from(99);
    if percentage.is_zero() {
        Ok(0)
    } else if percentage > Decimal::ZERO && percentage < Decimal::ONE {
        Ok(1)
    } else if percentage > ninety_nine && percentage < Decimal::ONE_HUNDRED {
        Ok(99)
    } else {
        percentage
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i32()
            .ok_or(out_of_range)
    }
}

/// Whether remaining work is the wrong value: % complete says 100 but work is
/// still left over (or remaining work is missing altogether).
pub fn is_remaining_work_correctable(values: &ProgressValues) -> bool {
    values.work.is_some()
        && values.remaining_work != Some(Decimal::ZERO)
        && values.percent_complete == Some(100)
}

/// Whether % complete is the wrong value.
///
/// Only true when neither derivation path agrees with what is stored: the
/// stored % complete differs from the one derived from work and remaining
/// work, and the stored remaining work differs from the one derived from
/// work and % complete.
pub fn is_percent_complete_correctable(mode: ProgressMode, values: &ProgressValues) -> bool {
    if !is_calculation_applicable(mode, values) {
        return false;
    }
    let (Some(work), Some(remaining_work), Some(percent_complete)) =
        (values.work, values.remaining_work, values.percent_complete)
    else {
        return false;
    };

    match compute_percent_complete(work, remaining_work) {
        Ok(derived) if derived != percent_complete => {
            compute_remaining_work(work, percent_complete) != remaining_work
        }
        _ => false,
    }
}

/// Whether the triple is complete and sane enough to be reconciled.
///
/// 100% is never reconciled here; see [`is_remaining_work_correctable`].
pub fn is_calculation_applicable(mode: ProgressMode, values: &ProgressValues) -> bool {
    if mode != ProgressMode::WorkBased {
        return false;
    }
    match (values.work, values.remaining_work, values.percent_complete) {
        (Some(work), Some(remaining_work), Some(percent_complete)) => {
            !work.is_zero()
                && percent_complete != 100
                && remaining_work >= Decimal::ZERO
                && work >= remaining_work
        }
        _ => false,
    }
}
