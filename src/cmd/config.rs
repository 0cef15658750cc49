//! Project setup and configuration commands: `wp-progress init` and
//! `wp-progress config`.

use anyhow::Result;
use wp_progress::init::{init_project, is_initialized};
use wp_progress::progress_config::ProgressConfig;
use wp_progress::ui::icons::{CHECK, WARN};

use super::super::ConfigCommands;

pub fn cmd_init(project_dir: &std::path::Path) -> Result<()> {
    let result = init_project(project_dir)?;
    if result.created {
        println!(
            "{}Initialized progress configuration at {}",
            CHECK,
            result.config_path.display()
        );
    } else {
        println!(
            "Project already initialized ({} exists)",
            result.config_path.display()
        );
    }
    Ok(())
}

pub fn cmd_config(config: &ProgressConfig, command: Option<ConfigCommands>) -> Result<()> {
    let config_path = config.config_path();
    let initialized = is_initialized(&config.project_dir);

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Progress Configuration");
            println!("======================");
            println!();

            if initialized {
                println!("Config file: {}", config_path.display());
            } else {
                println!("No progress.toml found at {}", config_path.display());
                println!("Using default configuration.");
            }
            println!();

            let toml = &config.toml;
            println!("[calculation]");
            println!("  mode = \"{}\"", toml.calculation.mode);
            println!();
            println!("[duration]");
            println!("  hours_per_day = {}", toml.duration.hours_per_day);
            println!("  days_per_week = {}", toml.duration.days_per_week);
            println!("  format = \"{}\"", toml.duration.format);
            println!();

            println!("Statuses:");
            for status in config.status_catalog().iter() {
                let excluded = if status.excluded_from_totals {
                    " (excluded from totals)"
                } else {
                    ""
                };
                println!(
                    "  {:<16} {:>3}%{}",
                    status.name, status.default_done_ratio, excluded
                );
            }
            println!();

            println!("Effective values (with env/CLI overrides):");
            let settings = config.duration_settings()?;
            println!("  mode = \"{}\"", config.mode()?);
            println!("  hours_per_day = {}", settings.hours_per_day);
            println!();

            if !initialized {
                println!("Run 'wp-progress config init' to create a progress.toml file.");
                println!();
            }
        }
        Some(ConfigCommands::Validate) => {
            if !initialized {
                println!("No progress.toml found. Using defaults (valid).");
                return Ok(());
            }

            let warnings = config.toml.validate();
            if warnings.is_empty() {
                println!("{}Configuration is valid.", CHECK);
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  {}{}", WARN, warning);
                }
            }
        }
        Some(ConfigCommands::Init) => {
            if initialized {
                println!("progress.toml already exists at {}", config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            let result = init_project(&config.project_dir)?;
            println!("{}Created {}", CHECK, result.config_path.display());
        }
    }

    Ok(())
}
