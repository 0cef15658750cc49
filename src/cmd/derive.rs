//! Attribute derivation: `wp-progress derive`.
//!
//! Input file format:
//!
//! ```json
//! {
//!   "previous": {"work": 10, "remaining_work": 4, "percent_complete": 60},
//!   "change": {"work": 12},
//!   "status": "In progress"
//! }
//! ```

use anyhow::{Context, Result};
use progress_common::{ProgressField, ProgressMode, ProgressValues};
use serde::{Deserialize, Serialize};
use std::path::Path;
use wp_progress::derive::{ProgressChange, ProgressDeriver};
use wp_progress::progress_config::ProgressConfig;
use wp_progress::ui::report::{render_derivation, render_validation};
use wp_progress::validation::validate;

use super::calc::ErrorEntry;
use super::{print_json, read_json};

#[derive(Debug, Deserialize)]
struct DeriveInput {
    #[serde(default)]
    previous: ProgressValues,
    #[serde(default)]
    change: ProgressChange,
    /// Status name, looked up in the configured statuses
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Serialize)]
struct DeriveOutput {
    mode: ProgressMode,
    values: ProgressValues,
    derived: Vec<ProgressField>,
    corrected: Vec<ProgressField>,
    errors: Vec<ErrorEntry>,
}

pub fn cmd_derive(config: &ProgressConfig, input: &Path, json: bool) -> Result<()> {
    let input: DeriveInput = read_json(input)?;
    let mode = config.mode()?;
    let catalog = config.status_catalog();

    let status = match &input.status {
        Some(name) => Some(
            catalog
                .find(name)
                .with_context(|| format!("Unknown status '{}'", name))?,
        ),
        None => None,
    };

    if input.change.is_empty() {
        tracing::debug!("No fields changed, checking stored values only");
    }

    let mut deriver = ProgressDeriver::new(mode);
    if let Some(status) = status {
        deriver = deriver.with_status(status);
    }

    let derivation = deriver
        .derive(&input.previous, &input.change)
        .context("Failed to derive progress values")?;
    let errors = validate(mode, &derivation.values);
    tracing::info!(
        derived = derivation.derived.len(),
        corrected = derivation.corrected.len(),
        errors = errors.len(),
        "Derived progress values"
    );

    if json {
        return print_json(&DeriveOutput {
            mode,
            values: derivation.values,
            derived: derivation.derived.clone(),
            corrected: derivation.corrected.clone(),
            errors: errors.iter().map(ErrorEntry::from).collect(),
        });
    }

    let settings = config.duration_settings()?;
    println!("{}", render_derivation(&settings, &derivation));
    println!();
    println!("{}", render_validation(&errors));
    Ok(())
}
