//! Status-based derivation rules.
//!
//! % complete always comes from the status and remaining work follows from
//! work. Only work may be entered by the user.

use progress_common::calculator::compute_remaining_work;
use progress_common::{ProgressField, ProgressMode, ProgressValues, Status};

use super::{Derivation, ProgressChange};
use crate::errors::DeriveError;

pub(super) fn derive(
    previous: &ProgressValues,
    change: &ProgressChange,
    status: &Status,
) -> Result<Derivation, DeriveError> {
    reject_read_only(previous, change)?;

    let values = ProgressValues {
        work: change.work.unwrap_or(previous.work),
        ..*previous
    }
    .rounded();
    let mut derivation = Derivation::new(values);

    let percent_complete = status.default_done_ratio;
    derivation.values.percent_complete = Some(percent_complete);
    derivation.mark_derived(ProgressField::PercentComplete);

    match derivation.values.work {
        Some(work) => {
            derivation.values.remaining_work =
                Some(compute_remaining_work(work, percent_complete).normalize());
            derivation.mark_derived(ProgressField::RemainingWork);
        }
        None if derivation.values.remaining_work.is_some() => {
            derivation.values.remaining_work = None;
            derivation.mark_derived(ProgressField::RemainingWork);
        }
        None => {}
    }

    Ok(derivation)
}

/// Remaining work and % complete are read-only; resubmitting the stored
/// value is tolerated.
fn reject_read_only(previous: &ProgressValues, change: &ProgressChange) -> Result<(), DeriveError> {
    let remaining_changed = change
        .remaining_work
        .is_some_and(|value| value.map(progress_common::round_hours) != previous.remaining_work);
    if remaining_changed {
        return Err(DeriveError::ReadOnlyField {
            field: ProgressField::RemainingWork,
            mode: ProgressMode::StatusBased,
        });
    }

    let percent_changed = change
        .percent_complete
        .is_some_and(|value| value != previous.percent_complete);
    if percent_changed {
        return Err(DeriveError::ReadOnlyField {
            field: ProgressField::PercentComplete,
            mode: ProgressMode::StatusBased,
        });
    }

    Ok(())
}
