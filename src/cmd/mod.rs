//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module          | Commands handled                                   |
//! |-----------------|-----------------------------------------------------|
//! | `calc`          | `Percent`, `Remaining`, `Work`, `Check`            |
//! | `derive`        | `Derive`                                           |
//! | `rollup`        | `Rollup`                                           |
//! | `duration`      | `Duration`                                         |
//! | `config`        | `Init`, `Config`                                   |

pub mod calc;
pub mod config;
pub mod derive;
pub mod duration;
pub mod rollup;

pub use calc::{cmd_check, cmd_percent, cmd_remaining, cmd_work};
pub use config::{cmd_config, cmd_init};
pub use derive::cmd_derive;
pub use duration::cmd_duration;
pub use rollup::cmd_rollup;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use wp_progress::duration::DurationSettings;

/// Parse an hours argument such as `8`, `1.5h` or `1d 4h`.
pub(crate) fn parse_hours_arg(settings: &DurationSettings, text: &str) -> Result<Decimal> {
    settings
        .parse_hours(text)
        .with_context(|| format!("Invalid hours '{}'", text))
}

/// Read and parse a JSON input file.
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse input file: {}", path.display()))
}

/// Print a value as pretty JSON.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
