//! Configuration for the progress engine.
//!
//! Reads `.progress/progress.toml` from the project directory and layers
//! environment variables and CLI arguments on top:
//! file → environment → CLI.
//!
//! # Configuration File Format
//!
//! ```toml
//! [calculation]
//! mode = "work_based"          # or "status_based"
//!
//! [duration]
//! hours_per_day = 8
//! days_per_week = 5
//! format = "hours_only"        # or "days_and_hours"
//!
//! [[statuses]]
//! name = "New"
//! default_done_ratio = 0
//!
//! [[statuses]]
//! name = "Rejected"
//! default_done_ratio = 100
//! excluded_from_totals = true
//! ```
//!
//! # Environment
//!
//! | Variable                 | Overrides                  |
//! |--------------------------|----------------------------|
//! | `PROGRESS_MODE`          | `calculation.mode`         |
//! | `PROGRESS_HOURS_PER_DAY` | `duration.hours_per_day`   |

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use progress_common::{ProgressMode, Status, StatusCatalog};
use serde::{Deserialize, Serialize};

use crate::duration::{DurationFormat, DurationSettings};
use crate::init::{CONFIG_FILE, get_progress_dir};

/// Calculation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculationSection {
    #[serde(default)]
    pub mode: ProgressMode,
}

/// Working-time settings used for duration input and output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationSection {
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: u32,
    #[serde(default = "default_days_per_week")]
    pub days_per_week: u32,
    #[serde(default)]
    pub format: DurationFormat,
}

fn default_hours_per_day() -> u32 {
    8
}

fn default_days_per_week() -> u32 {
    5
}

impl Default for DurationSection {
    fn default() -> Self {
        Self {
            hours_per_day: default_hours_per_day(),
            days_per_week: default_days_per_week(),
            format: DurationFormat::default(),
        }
    }
}

/// The complete progress.toml configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressToml {
    #[serde(default)]
    pub calculation: CalculationSection,
    #[serde(default)]
    pub duration: DurationSection,
    /// Known statuses; the default catalog is used when empty
    #[serde(default)]
    pub statuses: Vec<Status>,
}

impl ProgressToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse progress.toml")
    }

    /// Load from `<progress_dir>/progress.toml`, or defaults if it doesn't exist.
    pub fn load_or_default(progress_dir: &Path) -> Result<Self> {
        let config_path = progress_dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Configuration written by `wp-progress init`.
    pub fn with_default_statuses() -> Self {
        Self {
            statuses: StatusCatalog::default_catalog().iter().cloned().collect(),
            ..Self::default()
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize progress.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !(1..=24).contains(&self.duration.hours_per_day) {
            warnings.push(format!(
                "Invalid hours_per_day {}: should be between 1 and 24",
                self.duration.hours_per_day
            ));
        }

        if !(1..=7).contains(&self.duration.days_per_week) {
            warnings.push(format!(
                "Invalid days_per_week {}: should be between 1 and 7",
                self.duration.days_per_week
            ));
        }

        let mut names = HashSet::new();
        for status in &self.statuses {
            if !(0..=100).contains(&status.default_done_ratio) {
                warnings.push(format!(
                    "Invalid default_done_ratio {} for status '{}': should be between 0 and 100",
                    status.default_done_ratio, status.name
                ));
            }
            if !names.insert(status.name.to_lowercase()) {
                warnings.push(format!("Duplicate status '{}'", status.name));
            }
        }

        warnings
    }
}

/// Effective configuration: progress.toml merged with environment and CLI.
#[derive(Debug, Clone)]
pub struct ProgressConfig {
    /// Path to the project directory
    pub project_dir: PathBuf,
    /// Path to the .progress directory
    pub progress_dir: PathBuf,
    /// Parsed progress.toml configuration
    pub toml: ProgressToml,
    /// CLI override for the calculation mode
    pub cli_mode: Option<ProgressMode>,
}

impl ProgressConfig {
    pub fn new(project_dir: PathBuf) -> Result<Self> {
        Self::with_cli_args(project_dir, None)
    }

    pub fn with_cli_args(project_dir: PathBuf, cli_mode: Option<ProgressMode>) -> Result<Self> {
        let progress_dir = get_progress_dir(&project_dir);
        let toml = ProgressToml::load_or_default(&progress_dir)?;

        Ok(Self {
            project_dir,
            progress_dir,
            toml,
            cli_mode,
        })
    }

    pub fn config_path(&self) -> PathBuf {
        self.progress_dir.join(CONFIG_FILE)
    }

    /// Calculation mode: CLI, then `PROGRESS_MODE`, then the file.
    pub fn mode(&self) -> Result<ProgressMode> {
        if let Some(mode) = self.cli_mode {
            return Ok(mode);
        }
        if let Ok(env_val) = std::env::var("PROGRESS_MODE") {
            return env_val
                .parse()
                .context("Invalid PROGRESS_MODE environment variable");
        }
        Ok(self.toml.calculation.mode)
    }

    /// Duration settings, with `PROGRESS_HOURS_PER_DAY` applied.
    pub fn duration_settings(&self) -> Result<DurationSettings> {
        let hours_per_day = match std::env::var("PROGRESS_HOURS_PER_DAY") {
            Ok(env_val) => env_val
                .trim()
                .parse()
                .context("Invalid PROGRESS_HOURS_PER_DAY environment variable")?,
            Err(_) => self.toml.duration.hours_per_day,
        };

        Ok(DurationSettings {
            hours_per_day,
            days_per_week: self.toml.duration.days_per_week,
            format: self.toml.duration.format,
        })
    }

    pub fn status_catalog(&self) -> StatusCatalog {
        let catalog = StatusCatalog::new(self.toml.statuses.clone());
        if catalog.is_empty() {
            StatusCatalog::default_catalog()
        } else {
            catalog
        }
    }
}
