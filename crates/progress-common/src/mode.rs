//! Progress calculation mode.

use serde::{Deserialize, Serialize};

/// How % complete is tracked for work packages.
///
/// | Mode          | % complete comes from                         |
/// |---------------|-----------------------------------------------|
/// | `WorkBased`   | work and remaining work (or is set directly)  |
/// | `StatusBased` | the status' default done ratio                |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressMode {
    #[default]
    WorkBased,
    StatusBased,
}

impl ProgressMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressMode::WorkBased => "work_based",
            ProgressMode::StatusBased => "status_based",
        }
    }
}

impl std::fmt::Display for ProgressMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a mode name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid progress mode '{0}'. Valid values: work_based, status_based")]
pub struct ParseModeError(pub String);

impl std::str::FromStr for ProgressMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "work_based" | "work-based" | "work" => Ok(ProgressMode::WorkBased),
            "status_based" | "status-based" | "status" => Ok(ProgressMode::StatusBased),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}
