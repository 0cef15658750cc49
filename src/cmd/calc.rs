//! Single-value conversions and consistency checks: `wp-progress percent`,
//! `remaining`, `work` and `check`.

use anyhow::{Context, Result};
use progress_common::calculator::{
    compute_percent_complete, compute_remaining_work, compute_work, is_calculation_applicable,
    is_percent_complete_correctable, is_remaining_work_correctable,
};
use progress_common::{ProgressField, ProgressMode, ProgressValues};
use serde::Serialize;
use serde_json::json;
use wp_progress::errors::ValidationError;
use wp_progress::progress_config::ProgressConfig;
use wp_progress::ui::report::render_validation;
use wp_progress::validation::validate;

use super::{parse_hours_arg, print_json};

fn ensure_percent_in_range(percent: i32) -> Result<()> {
    if !(0..=100).contains(&percent) {
        return Err(ValidationError::PercentCompleteOutOfRange { value: percent }.into());
    }
    Ok(())
}

pub fn cmd_percent(config: &ProgressConfig, work: &str, remaining: &str, json: bool) -> Result<()> {
    let settings = config.duration_settings()?;
    let work = parse_hours_arg(&settings, work)?;
    let remaining_work = parse_hours_arg(&settings, remaining)?;

    let percent_complete =
        compute_percent_complete(work, remaining_work).context("Cannot derive % complete")?;

    if json {
        print_json(&json!({
            "work": work,
            "remaining_work": remaining_work,
            "percent_complete": percent_complete,
        }))
    } else {
        println!("{}%", percent_complete);
        Ok(())
    }
}

pub fn cmd_remaining(config: &ProgressConfig, work: &str, percent: i32, json: bool) -> Result<()> {
    let settings = config.duration_settings()?;
    let work = parse_hours_arg(&settings, work)?;
    ensure_percent_in_range(percent)?;

    let remaining_work = compute_remaining_work(work, percent).normalize();

    if json {
        print_json(&json!({
            "work": work,
            "remaining_work": remaining_work,
            "percent_complete": percent,
        }))
    } else {
        println!("{}", settings.format_hours(remaining_work));
        Ok(())
    }
}

pub fn cmd_work(config: &ProgressConfig, remaining: &str, percent: i32, json: bool) -> Result<()> {
    let settings = config.duration_settings()?;
    let remaining_work = parse_hours_arg(&settings, remaining)?;
    ensure_percent_in_range(percent)?;

    let work = compute_work(remaining_work, percent)
        .context("Cannot derive work")?
        .normalize();

    if json {
        print_json(&json!({
            "work": work,
            "remaining_work": remaining_work,
            "percent_complete": percent,
        }))
    } else {
        println!("{}", settings.format_hours(work));
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct CheckReport {
    mode: ProgressMode,
    values: ProgressValues,
    calculation_applicable: bool,
    remaining_work_correctable: bool,
    percent_complete_correctable: bool,
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorEntry {
    pub field: ProgressField,
    pub message: String,
}

impl From<&ValidationError> for ErrorEntry {
    fn from(error: &ValidationError) -> Self {
        Self {
            field: error.field(),
            message: error.to_string(),
        }
    }
}

pub fn cmd_check(
    config: &ProgressConfig,
    work: Option<&str>,
    remaining: Option<&str>,
    percent: Option<i32>,
    json: bool,
) -> Result<()> {
    let settings = config.duration_settings()?;
    let mode = config.mode()?;

    let values = ProgressValues::new(
        work.map(|w| parse_hours_arg(&settings, w)).transpose()?,
        remaining.map(|r| parse_hours_arg(&settings, r)).transpose()?,
        percent,
    )
    .rounded();

    let errors = validate(mode, &values);
    let report = CheckReport {
        mode,
        values,
        calculation_applicable: is_calculation_applicable(mode, &values),
        remaining_work_correctable: is_remaining_work_correctable(&values),
        percent_complete_correctable: is_percent_complete_correctable(mode, &values),
        errors: errors.iter().map(ErrorEntry::from).collect(),
    };
    tracing::debug!(?report, "Checked progress values");

    if json {
        return print_json(&report);
    }

    if values.is_empty() {
        println!("No progress values given.");
    }
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };
    println!("Mode: {}", report.mode);
    println!(
        "Calculation applicable:      {}",
        yes_no(report.calculation_applicable)
    );
    println!(
        "Remaining work correctable:  {}",
        yes_no(report.remaining_work_correctable)
    );
    println!(
        "% complete correctable:      {}",
        yes_no(report.percent_complete_correctable)
    );
    println!("{}", render_validation(&errors));
    Ok(())
}
