//! Work-based derivation rules.
//!
//! | Touched              | Derived                                            |
//! |----------------------|----------------------------------------------------|
//! | work                 | remaining work (shifted by the work delta), then % |
//! | work + remaining     | % complete                                         |
//! | work + %             | remaining work                                     |
//! | remaining            | % complete, or work when work is unset             |
//! | %                    | remaining work, or work when work is unset         |
//! | remaining + %        | work                                               |
//! | all three            | nothing                                            |
//!
//! Clearing work clears an untouched remaining work. A correction pass runs
//! last over the untouched fields.

use progress_common::calculator::{
    compute_percent_complete, compute_remaining_work, compute_work, is_percent_complete_correctable,
    is_remaining_work_correctable,
};
use progress_common::{CalculationError, ProgressField, ProgressMode, ProgressValues};
use rust_decimal::Decimal;

use super::{Derivation, ProgressChange};
use crate::errors::DeriveError;

pub(super) fn derive(
    previous: &ProgressValues,
    change: &ProgressChange,
) -> Result<Derivation, DeriveError> {
    let mut derivation = Derivation::new(change.apply_to(previous).rounded());

    let work_touched = change.touches(ProgressField::Work);
    let remaining_touched = change.touches(ProgressField::RemainingWork);
    let percent_touched = change.touches(ProgressField::PercentComplete);

    if work_touched
        && !remaining_touched
        && derivation.values.work.is_none()
        && derivation.values.remaining_work.is_some()
    {
        derivation.values.remaining_work = None;
        derivation.mark_derived(ProgressField::RemainingWork);
    }

    match (work_touched, remaining_touched, percent_touched) {
        (true, false, false) => on_work_changed(previous, &mut derivation)?,
        (true, true, false) => derive_percent_complete(&mut derivation)?,
        (true, false, true) => derive_remaining_work(&mut derivation),
        (false, true, false) => {
            if has_nonzero_work(&derivation.values) {
                derive_percent_complete(&mut derivation)?;
            } else if derivation.values.work.is_none() {
                derive_work(&mut derivation)?;
            }
        }
        (false, false, true) => {
            if derivation.values.work.is_some() {
                derive_remaining_work(&mut derivation);
            } else {
                derive_work(&mut derivation)?;
            }
        }
        (false, true, true) => derive_work(&mut derivation)?,
        (true, true, true) | (false, false, false) => {}
    }

    correct(change, &mut derivation);
    Ok(derivation)
}

/// Only work changed: keep the amount of done work stable where possible.
fn on_work_changed(
    previous: &ProgressValues,
    derivation: &mut Derivation,
) -> Result<(), DeriveError> {
    let Some(work) = derivation.values.work else {
        return Ok(());
    };

    match (previous.work, previous.remaining_work) {
        (Some(old_work), Some(old_remaining)) => {
            let remaining = shift_remaining_work(old_remaining, old_work, work)?;
            derivation.values.remaining_work = Some(remaining.normalize());
            derivation.mark_derived(ProgressField::RemainingWork);
        }
        _ if derivation.values.remaining_work.is_none() => {
            if derivation.values.percent_complete.is_some() {
                derive_remaining_work(derivation);
            } else {
                derivation.values.remaining_work = Some(work);
                derivation.mark_derived(ProgressField::RemainingWork);
            }
        }
        _ => {}
    }

    derive_percent_complete(derivation)
}

/// Move remaining work by the same delta as work, clamped to `[0, work]`.
fn shift_remaining_work(
    old_remaining: Decimal,
    old_work: Decimal,
    work: Decimal,
) -> Result<Decimal, CalculationError> {
    let remaining = work
        .checked_sub(old_work)
        .and_then(|delta| old_remaining.checked_add(delta))
        .ok_or(CalculationError::OutOfRange {
            operation: "shift_remaining_work",
        })?;
    Ok(remaining.min(work).max(Decimal::ZERO))
}

fn derive_percent_complete(derivation: &mut Derivation) -> Result<(), DeriveError> {
    let values = &derivation.values;
    let (Some(work), Some(remaining_work)) = (values.work, values.remaining_work) else {
        return Ok(());
    };
    if work.is_zero() || remaining_work < Decimal::ZERO || remaining_work > work {
        return Ok(());
    }

    derivation.values.percent_complete = Some(compute_percent_complete(work, remaining_work)?);
    derivation.mark_derived(ProgressField::PercentComplete);
    Ok(())
}

fn derive_remaining_work(derivation: &mut Derivation) {
    let values = &derivation.values;
    let (Some(work), Some(percent_complete)) = (values.work, values.percent_complete) else {
        return;
    };
    if work < Decimal::ZERO || !(0..=100).contains(&percent_complete) {
        return;
    }

    derivation.values.remaining_work =
        Some(compute_remaining_work(work, percent_complete).normalize());
    derivation.mark_derived(ProgressField::RemainingWork);
}

fn derive_work(derivation: &mut Derivation) -> Result<(), DeriveError> {
    let values = &derivation.values;
    let (Some(remaining_work), Some(percent_complete)) =
        (values.remaining_work, values.percent_complete)
    else {
        return Ok(());
    };
    // 100% leaves no remaining fraction to scale from
    if remaining_work < Decimal::ZERO || !(0..100).contains(&percent_complete) {
        return Ok(());
    }

    derivation.values.work = Some(compute_work(remaining_work, percent_complete)?.normalize());
    derivation.mark_derived(ProgressField::Work);
    Ok(())
}

fn correct(change: &ProgressChange, derivation: &mut Derivation) {
    if !change.touches(ProgressField::RemainingWork)
        && is_remaining_work_correctable(&derivation.values)
    {
        derivation.values.remaining_work = Some(Decimal::ZERO);
        derivation.mark_corrected(ProgressField::RemainingWork);
        return;
    }

    if !change.touches(ProgressField::PercentComplete)
        && is_percent_complete_correctable(ProgressMode::WorkBased, &derivation.values)
        && let (Some(work), Some(remaining_work)) =
            (derivation.values.work, derivation.values.remaining_work)
        && let Ok(percent_complete) = compute_percent_complete(work, remaining_work)
    {
        derivation.values.percent_complete = Some(percent_complete);
        derivation.mark_corrected(ProgressField::PercentComplete);
    }
}

fn has_nonzero_work(values: &ProgressValues) -> bool {
    values.work.is_some_and(|work| !work.is_zero())
}
