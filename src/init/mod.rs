//! Initialization of the `.progress/` project directory.
//!
//! ```text
//! .progress/
//! └── progress.toml    # Calculation mode, working time, statuses
//! ```

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::progress_config::ProgressToml;

/// The name of the progress configuration directory.
pub const PROGRESS_DIR: &str = ".progress";

/// The name of the configuration file inside [`PROGRESS_DIR`].
pub const CONFIG_FILE: &str = "progress.toml";

/// Result of initializing a project.
#[derive(Debug)]
pub struct InitResult {
    /// Path to the .progress directory
    pub progress_dir: PathBuf,
    /// Path to the configuration file
    pub config_path: PathBuf,
    /// Whether the configuration file was newly created
    pub created: bool,
}

/// Initialize a project in the given directory.
///
/// Creates `.progress/progress.toml` with default settings and statuses. An
/// existing configuration file is left untouched.
pub fn init_project(project_dir: &Path) -> Result<InitResult> {
    let progress_dir = get_progress_dir(project_dir);
    std::fs::create_dir_all(&progress_dir)
        .with_context(|| format!("Failed to create directory: {}", progress_dir.display()))?;

    let config_path = progress_dir.join(CONFIG_FILE);
    let created = if config_path.exists() {
        false
    } else {
        ProgressToml::with_default_statuses().save(&config_path)?;
        tracing::info!(path = %config_path.display(), "Created progress configuration");
        true
    };

    Ok(InitResult {
        progress_dir,
        config_path,
        created,
    })
}

/// Check if a project has a progress configuration.
pub fn is_initialized(project_dir: &Path) -> bool {
    get_progress_dir(project_dir).join(CONFIG_FILE).exists()
}

/// Get the path to the progress directory for a project.
pub fn get_progress_dir(project_dir: &Path) -> PathBuf {
    project_dir.join(PROGRESS_DIR)
}
