//! Human duration input and output for hour values.
//!
//! Work and remaining work are stored as hours, but users type `1d 4h` or
//! `30m`. Days and weeks are converted with the configured working hours per
//! day and working days per week.

use std::str::FromStr;
use std::sync::LazyLock;

use progress_common::round_hours;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DurationError;

static BARE_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:[.,]\d+)?$").unwrap());

static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:[.,]\d+)?)\s*([[:alpha:]]+)\s*").unwrap());

/// How hour values are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationFormat {
    /// `10h`
    #[default]
    HoursOnly,
    /// `1d 2h`
    DaysAndHours,
}

impl std::fmt::Display for DurationFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationFormat::HoursOnly => write!(f, "hours_only"),
            DurationFormat::DaysAndHours => write!(f, "days_and_hours"),
        }
    }
}

/// Working-time settings used to convert durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationSettings {
    pub hours_per_day: u32,
    pub days_per_week: u32,
    pub format: DurationFormat,
}

impl Default for DurationSettings {
    fn default() -> Self {
        Self {
            hours_per_day: 8,
            days_per_week: 5,
            format: DurationFormat::default(),
        }
    }
}

impl DurationSettings {
    /// Parse a duration into hours, rounded to 2 dp.
    ///
    /// Accepts a bare number of hours (`8`, `1.5`, `1,5`) or a sequence of
    /// `<number><unit>` tokens (`1w 2d`, `1d 4h`, `2h30m`).
    pub fn parse_hours(&self, input: &str) -> Result<Decimal, DurationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DurationError::Empty);
        }

        if BARE_NUMBER_REGEX.is_match(trimmed) {
            return Ok(round_hours(parse_number(trimmed, input)?).normalize());
        }

        let mut total = Decimal::ZERO;
        let mut rest = trimmed;
        while !rest.is_empty() {
            let captures = TOKEN_REGEX
                .captures(rest)
                .ok_or_else(|| DurationError::InvalidFormat {
                    input: input.to_string(),
                })?;
            let value = parse_number(&captures[1], input)?;
            total = value
                .checked_mul(self.unit_in_hours(&captures[2])?)
                .and_then(|hours| total.checked_add(hours))
                .ok_or_else(|| DurationError::OutOfRange {
                    input: input.to_string(),
                })?;
            rest = &rest[captures[0].len()..];
        }

        Ok(round_hours(total).normalize())
    }

    /// Render hours in the configured format.
    pub fn format_hours(&self, hours: Decimal) -> String {
        let hours = round_hours(hours).normalize();
        match self.format {
            DurationFormat::DaysAndHours if self.hours_per_day > 0 && hours >= Decimal::ZERO => {
                let hours_per_day = Decimal::from(self.hours_per_day);
                let days = (hours / hours_per_day).floor();
                let rest = (hours - days * hours_per_day).normalize();

                let mut parts = Vec::new();
                if days > Decimal::ZERO {
                    parts.push(format!("{}d", days.normalize()));
                }
                if rest > Decimal::ZERO || days.is_zero() {
                    parts.push(format!("{}h", rest));
                }
                parts.join(" ")
            }
            _ => format!("{}h", hours),
        }
    }

    fn unit_in_hours(&self, unit: &str) -> Result<Decimal, DurationError> {
        let hours_per_day = Decimal::from(self.hours_per_day);
        match unit.to_lowercase().as_str() {
            "w" | "week" | "weeks" => Ok(hours_per_day * Decimal::from(self.days_per_week)),
            "d" | "day" | "days" => Ok(hours_per_day),
            "h" | "hr" | "hrs" | "hour" | "hours" => Ok(Decimal::ONE),
            "m" | "min" | "mins" | "minute" | "minutes" => Ok(Decimal::ONE / Decimal::from(60)),
            _ => Err(DurationError::UnknownUnit {
                unit: unit.to_string(),
            }),
        }
    }
}

fn parse_number(text: &str, input: &str) -> Result<Decimal, DurationError> {
    Decimal::from_str(&text.replace(',', ".")).map_err(|_| DurationError::InvalidFormat {
        input: input.to_string(),
    })
}
