//! Derive progress values after a user changes some of them.
//!
//! A change touches any subset of work, remaining work and % complete. The
//! fields the user touched are kept as entered; untouched fields are derived
//! from the others according to the progress mode:
//!
//! | Mode           | Module           |
//! |----------------|------------------|
//! | `WorkBased`    | `work_based`     |
//! | `StatusBased`  | `status_based`   |
//!
//! Values are rounded to storage precision before any rule runs.

mod status_based;
mod work_based;

use progress_common::{ProgressField, ProgressMode, ProgressValues, Status};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::DeriveError;

/// Fields a user changed, with their new values.
///
/// Outer `None`: untouched. `Some(None)`: cleared. `Some(Some(v))`: set.
/// In JSON a missing key is untouched and `null` clears the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressChange {
    #[serde(
        default,
        deserialize_with = "deserialize_touched",
        skip_serializing_if = "Option::is_none"
    )]
    pub work: Option<Option<Decimal>>,
    #[serde(
        default,
        deserialize_with = "deserialize_touched",
        skip_serializing_if = "Option::is_none"
    )]
    pub remaining_work: Option<Option<Decimal>>,
    #[serde(
        default,
        deserialize_with = "deserialize_touched",
        skip_serializing_if = "Option::is_none"
    )]
    pub percent_complete: Option<Option<i32>>,
}

fn deserialize_touched<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl ProgressChange {
    pub fn set_work(mut self, work: Option<Decimal>) -> Self {
        self.work = Some(work);
        self
    }

    pub fn set_remaining_work(mut self, remaining_work: Option<Decimal>) -> Self {
        self.remaining_work = Some(remaining_work);
        self
    }

    pub fn set_percent_complete(mut self, percent_complete: Option<i32>) -> Self {
        self.percent_complete = Some(percent_complete);
        self
    }

    pub fn touches(&self, field: ProgressField) -> bool {
        match field {
            ProgressField::Work => self.work.is_some(),
            ProgressField::RemainingWork => self.remaining_work.is_some(),
            ProgressField::PercentComplete => self.percent_complete.is_some(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.work.is_none() && self.remaining_work.is_none() && self.percent_complete.is_none()
    }

    /// Overlay the touched fields on `previous`.
    pub fn apply_to(&self, previous: &ProgressValues) -> ProgressValues {
        ProgressValues {
            work: self.work.unwrap_or(previous.work),
            remaining_work: self.remaining_work.unwrap_or(previous.remaining_work),
            percent_complete: self.percent_complete.unwrap_or(previous.percent_complete),
        }
    }
}

/// Outcome of a derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Derivation {
    /// Final values to persist
    pub values: ProgressValues,
    /// Fields computed from the others because of the change
    pub derived: Vec<ProgressField>,
    /// Untouched fields silently fixed because they were inconsistent
    pub corrected: Vec<ProgressField>,
}

impl Derivation {
    fn new(values: ProgressValues) -> Self {
        Self {
            values,
            derived: Vec::new(),
            corrected: Vec::new(),
        }
    }

    fn mark_derived(&mut self, field: ProgressField) {
        tracing::debug!(%field, values = ?self.values, "Derived progress value");
        if !self.derived.contains(&field) {
            self.derived.push(field);
        }
    }

    fn mark_corrected(&mut self, field: ProgressField) {
        tracing::debug!(%field, values = ?self.values, "Corrected inconsistent progress value");
        if !self.corrected.contains(&field) {
            self.corrected.push(field);
        }
    }
}

/// Applies a [`ProgressChange`] to stored values for a given mode.
#[derive(Debug, Clone, Copy)]
pub struct ProgressDeriver<'a> {
    mode: ProgressMode,
    status: Option<&'a Status>,
}

impl<'a> ProgressDeriver<'a> {
    pub fn new(mode: ProgressMode) -> Self {
        Self { mode, status: None }
    }

    /// Status of the work package, required in status-based mode.
    pub fn with_status(mut self, status: &'a Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn derive(
        &self,
        previous: &ProgressValues,
        change: &ProgressChange,
    ) -> Result<Derivation, DeriveError> {
        let previous = previous.rounded();
        match self.mode {
            ProgressMode::WorkBased => work_based::derive(&previous, change),
            ProgressMode::StatusBased => {
                let status = self.status.ok_or(DeriveError::MissingStatus)?;
                status_based::derive(&previous, change, status)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_change_deserialize_distinguishes_missing_and_null() {
        let change: ProgressChange =
            serde_json::from_str(r#"{"work": 10, "remaining_work": null}"#).unwrap();
        assert_eq!(change.work, Some(Some(dec("10"))));
        assert_eq!(change.remaining_work, Some(None));
        assert_eq!(change.percent_complete, None);
        assert!(change.touches(ProgressField::RemainingWork));
        assert!(!change.touches(ProgressField::PercentComplete));
    }

    #[test]
    fn test_change_apply_to_overlays_touched_fields() {
        let previous = ProgressValues::new(Some(dec("8")), Some(dec("2")), Some(75));
        let change = ProgressChange::default()
            .set_work(Some(dec("10")))
            .set_percent_complete(None);
        let applied = change.apply_to(&previous);
        assert_eq!(applied.work, Some(dec("10")));
        assert_eq!(applied.remaining_work, Some(dec("2")));
        assert_eq!(applied.percent_complete, None);
    }

    #[test]
    fn test_empty_change() {
        assert!(ProgressChange::default().is_empty());
        assert!(!ProgressChange::default().set_work(None).is_empty());
    }

    #[test]
    fn test_status_based_requires_status() {
        let deriver = ProgressDeriver::new(ProgressMode::StatusBased);
        let result = deriver.derive(&ProgressValues::default(), &ProgressChange::default());
        assert!(matches!(result, Err(DeriveError::MissingStatus)));
    }

    #[test]
    fn test_derive_rounds_previous_values() {
        let deriver = ProgressDeriver::new(ProgressMode::WorkBased);
        let previous = ProgressValues::new(Some(dec("8.004")), Some(dec("2.001")), Some(75));
        let derivation = deriver.derive(&previous, &ProgressChange::default()).unwrap();
        assert_eq!(derivation.values.work, Some(dec("8")));
        assert_eq!(derivation.values.remaining_work, Some(dec("2")));
    }
}
