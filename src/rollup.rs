//! Progress totals across a work package hierarchy.
//!
//! Every node gets totals over itself and all of its descendants. Nodes in a
//! status that is excluded from totals contribute nothing, but their own
//! descendants still do.

use std::collections::HashSet;

use progress_common::calculator::compute_percent_complete;
use progress_common::{ProgressMode, ProgressValues, StatusCatalog};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::errors::RollupError;

/// A work package with its children, as read from a hierarchy file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkPackageNode {
    pub id: u64,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub work: Option<Decimal>,
    #[serde(default)]
    pub remaining_work: Option<Decimal>,
    #[serde(default)]
    pub percent_complete: Option<i32>,
    /// Status name, looked up in the status catalog
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub children: Vec<WorkPackageNode>,
}

impl WorkPackageNode {
    pub fn values(&self) -> ProgressValues {
        ProgressValues::new(self.work, self.remaining_work, self.percent_complete).rounded()
    }
}

/// Totals for one node of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollupReport {
    pub id: u64,
    pub subject: String,
    pub total_work: Option<Decimal>,
    pub total_remaining_work: Option<Decimal>,
    pub total_percent_complete: Option<i32>,
    pub children: Vec<RollupReport>,
}

#[derive(Debug, Default)]
struct Accumulator {
    work: Option<Decimal>,
    remaining_work: Option<Decimal>,
    percent_sum: i64,
    percent_count: i64,
}

impl Accumulator {
    fn add_values(&mut self, id: u64, values: &ProgressValues) -> Result<(), RollupError> {
        add_hours(&mut self.work, values.work, id)?;
        add_hours(&mut self.remaining_work, values.remaining_work, id)?;
        if let Some(percent_complete) = values.percent_complete {
            self.percent_sum += i64::from(percent_complete);
            self.percent_count += 1;
        }
        Ok(())
    }

    fn merge(&mut self, id: u64, other: &Accumulator) -> Result<(), RollupError> {
        add_hours(&mut self.work, other.work, id)?;
        add_hours(&mut self.remaining_work, other.remaining_work, id)?;
        self.percent_sum += other.percent_sum;
        self.percent_count += other.percent_count;
        Ok(())
    }

    fn percent_complete(&self, mode: ProgressMode) -> Option<i32> {
        if let (Some(work), Some(remaining_work)) = (self.work, self.remaining_work)
            && !work.is_zero()
            && remaining_work >= Decimal::ZERO
            && remaining_work <= work
        {
            return compute_percent_complete(work, remaining_work).ok();
        }

        if mode == ProgressMode::StatusBased && self.percent_count > 0 {
            let mean = Decimal::from(self.percent_sum) / Decimal::from(self.percent_count);
            return mean
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i32()
                .map(|percent_complete| percent_complete.clamp(0, 100));
        }

        None
    }
}

fn add_hours(total: &mut Option<Decimal>, hours: Option<Decimal>, id: u64) -> Result<(), RollupError> {
    if let Some(hours) = hours {
        let sum = total
            .unwrap_or_default()
            .checked_add(hours)
            .ok_or(RollupError::TotalOutOfRange { id })?;
        *total = Some(sum);
    }
    Ok(())
}

/// Compute totals for `root` and every node below it.
pub fn rollup(
    root: &WorkPackageNode,
    mode: ProgressMode,
    catalog: &StatusCatalog,
) -> Result<RollupReport, RollupError> {
    let mut seen = HashSet::new();
    check_unique_ids(root, &mut seen)?;

    let (report, _) = rollup_node(root, mode, catalog)?;
    Ok(report)
}

fn check_unique_ids(node: &WorkPackageNode, seen: &mut HashSet<u64>) -> Result<(), RollupError> {
    if !seen.insert(node.id) {
        return Err(RollupError::DuplicateId { id: node.id });
    }
    for child in &node.children {
        check_unique_ids(child, seen)?;
    }
    Ok(())
}

fn rollup_node(
    node: &WorkPackageNode,
    mode: ProgressMode,
    catalog: &StatusCatalog,
) -> Result<(RollupReport, Accumulator), RollupError> {
    let excluded = match &node.status {
        Some(name) => {
            catalog
                .find(name)
                .ok_or_else(|| RollupError::UnknownStatus {
                    id: node.id,
                    status: name.clone(),
                })?
                .excluded_from_totals
        }
        None => false,
    };

    let mut accumulator = Accumulator::default();
    if excluded {
        tracing::debug!(id = node.id, "Work package excluded from totals");
    } else {
        accumulator.add_values(node.id, &node.values())?;
    }

    let mut children = Vec::with_capacity(node.children.len());
    for child in &node.children {
        let (child_report, child_accumulator) = rollup_node(child, mode, catalog)?;
        accumulator.merge(node.id, &child_accumulator)?;
        children.push(child_report);
    }

    let report = RollupReport {
        id: node.id,
        subject: node.subject.clone(),
        total_work: accumulator.work.map(|w| w.normalize()),
        total_remaining_work: accumulator.remaining_work.map(|r| r.normalize()),
        total_percent_complete: accumulator.percent_complete(mode),
        children,
    };
    Ok((report, accumulator))
}
