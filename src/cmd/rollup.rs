//! Hierarchy totals: `wp-progress rollup`.

use anyhow::{Context, Result};
use std::path::Path;
use wp_progress::progress_config::ProgressConfig;
use wp_progress::rollup::{WorkPackageNode, rollup};
use wp_progress::ui::report::render_rollup;

use super::{print_json, read_json};

pub fn cmd_rollup(config: &ProgressConfig, input: &Path, json: bool) -> Result<()> {
    let root: WorkPackageNode = read_json(input)?;
    let mode = config.mode()?;

    let report = rollup(&root, mode, &config.status_catalog())
        .context("Failed to compute progress totals")?;

    if json {
        return print_json(&report);
    }

    let settings = config.duration_settings()?;
    println!("{}", render_rollup(&settings, &report));
    Ok(())
}
