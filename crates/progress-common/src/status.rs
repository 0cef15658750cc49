//! Work package statuses as far as progress tracking is concerned.

use serde::{Deserialize, Serialize};

/// A work package status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub name: String,
    /// % complete assigned to work packages in this status (status-based mode)
    #[serde(default)]
    pub default_done_ratio: i32,
    /// Work packages in this status do not count towards parent totals
    #[serde(default)]
    pub excluded_from_totals: bool,
}

impl Status {
    pub fn new(name: impl Into<String>, default_done_ratio: i32) -> Self {
        Self {
            name: name.into(),
            default_done_ratio,
            excluded_from_totals: false,
        }
    }

    pub fn excluded_from_totals(mut self) -> Self {
        self.excluded_from_totals = true;
        self
    }
}

/// Ordered set of known statuses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCatalog {
    statuses: Vec<Status>,
}

impl StatusCatalog {
    pub fn new(statuses: Vec<Status>) -> Self {
        Self { statuses }
    }

    /// Statuses used when nothing is configured.
    pub fn default_catalog() -> Self {
        Self::new(vec![
            Status::new("New", 0),
            Status::new("In progress", 50),
            Status::new("Closed", 100),
            Status::new("Rejected", 100).excluded_from_totals(),
        ])
    }

    /// Case-insensitive lookup by name.
    pub fn find(&self, name: &str) -> Option<&Status> {
        let name = name.trim();
        self.statuses
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Status> {
        self.statuses.iter()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}
