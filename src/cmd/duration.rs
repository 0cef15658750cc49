//! Duration conversions: `wp-progress duration parse|format`.

use anyhow::Result;
use serde_json::json;
use wp_progress::progress_config::ProgressConfig;

use super::super::DurationCommands;
use super::{parse_hours_arg, print_json};

pub fn cmd_duration(config: &ProgressConfig, command: DurationCommands, json: bool) -> Result<()> {
    let settings = config.duration_settings()?;

    match command {
        DurationCommands::Parse { text } => {
            let hours = parse_hours_arg(&settings, &text)?;
            if json {
                print_json(&json!({ "input": text, "hours": hours }))?;
            } else {
                println!("{}", hours);
            }
        }
        DurationCommands::Format { hours } => {
            let hours = parse_hours_arg(&settings, &hours)?;
            let formatted = settings.format_hours(hours);
            if json {
                print_json(&json!({ "hours": hours, "formatted": formatted }))?;
            } else {
                println!("{}", formatted);
            }
        }
    }

    Ok(())
}
