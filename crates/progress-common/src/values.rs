//! The work / remaining work / % complete triple.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places hours are stored with.
pub const HOURS_SCALE: u32 = 2;

/// Round an hour value to storage precision (2 dp, half away from zero).
pub fn round_hours(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(HOURS_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// One of the three progress attributes of a work package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressField {
    Work,
    RemainingWork,
    PercentComplete,
}

impl ProgressField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressField::Work => "work",
            ProgressField::RemainingWork => "remaining_work",
            ProgressField::PercentComplete => "percent_complete",
        }
    }
}

impl std::fmt::Display for ProgressField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress values of a single work package.
///
/// Transient: recomputed on every attribute change and never stored as a
/// record of its own. Any of the three values may be unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressValues {
    /// Estimated effort in hours
    #[serde(default)]
    pub work: Option<Decimal>,
    /// Hours of `work` not yet done
    #[serde(default)]
    pub remaining_work: Option<Decimal>,
    /// Completion ratio, 0..=100
    #[serde(default)]
    pub percent_complete: Option<i32>,
}

impl ProgressValues {
    pub fn new(
        work: Option<Decimal>,
        remaining_work: Option<Decimal>,
        percent_complete: Option<i32>,
    ) -> Self {
        Self {
            work,
            remaining_work,
            percent_complete,
        }
    }

    /// Copy with hours rounded to storage precision and trailing zeros dropped.
    pub fn rounded(&self) -> Self {
        Self {
            work: self.work.map(|w| round_hours(w).normalize()),
            remaining_work: self.remaining_work.map(|r| round_hours(r).normalize()),
            percent_complete: self.percent_complete,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.work.is_none() && self.remaining_work.is_none() && self.percent_complete.is_none()
    }
}
