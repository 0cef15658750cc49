//! Text rendering for CLI output.
//!
//! Renderers return `String`s so commands decide where output goes.

use console::style;
use progress_common::{ProgressField, ProgressValues};

use crate::derive::Derivation;
use crate::duration::DurationSettings;
use crate::errors::ValidationError;
use crate::rollup::RollupReport;
use crate::ui::icons::{CHECK, CORRECTED, CROSS, DERIVED};

const BAR_WIDTH: usize = 20;

/// A fixed-width completion bar, e.g. `[#####---------------]`.
pub fn percent_bar(percent_complete: i32) -> String {
    let clamped = percent_complete.clamp(0, 100) as usize;
    let filled = clamped * BAR_WIDTH / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn hours_or_dash(settings: &DurationSettings, hours: Option<rust_decimal::Decimal>) -> String {
    hours
        .map(|h| settings.format_hours(h))
        .unwrap_or_else(|| "-".to_string())
}

fn percent_or_dash(percent_complete: Option<i32>) -> String {
    percent_complete
        .map(|p| format!("{}%", p))
        .unwrap_or_else(|| "-".to_string())
}

fn field_value(settings: &DurationSettings, values: &ProgressValues, field: ProgressField) -> String {
    match field {
        ProgressField::Work => hours_or_dash(settings, values.work),
        ProgressField::RemainingWork => hours_or_dash(settings, values.remaining_work),
        ProgressField::PercentComplete => percent_or_dash(values.percent_complete),
    }
}

fn field_label(field: ProgressField) -> &'static str {
    match field {
        ProgressField::Work => "Work",
        ProgressField::RemainingWork => "Remaining work",
        ProgressField::PercentComplete => "% complete",
    }
}

/// Render values with a marker for each derived or corrected field.
pub fn render_derivation(settings: &DurationSettings, derivation: &Derivation) -> String {
    let mut lines = Vec::new();
    for field in [
        ProgressField::Work,
        ProgressField::RemainingWork,
        ProgressField::PercentComplete,
    ] {
        let value = field_value(settings, &derivation.values, field);
        let marker = if derivation.corrected.contains(&field) {
            format!("{}corrected", CORRECTED)
        } else if derivation.derived.contains(&field) {
            format!("{}derived", DERIVED)
        } else {
            String::new()
        };
        lines.push(
            format!("{:<16} {:<10} {}", field_label(field), value, marker)
                .trim_end()
                .to_string(),
        );
    }
    if let Some(percent_complete) = derivation.values.percent_complete {
        lines.push(format!("{:<16} {}", "", percent_bar(percent_complete)));
    }
    lines.join("\n")
}

/// Render validation results: a single OK line, or one line per error.
pub fn render_validation(errors: &[ValidationError]) -> String {
    if errors.is_empty() {
        return format!("{}{}", CHECK, style("Progress values are consistent").green());
    }
    errors
        .iter()
        .map(|e| format!("{}{}: {}", CROSS, e.field(), style(e).red()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a rollup report as an indented tree.
pub fn render_rollup(settings: &DurationSettings, report: &RollupReport) -> String {
    let mut lines = Vec::new();
    render_rollup_node(settings, report, 0, &mut lines);
    lines.join("\n")
}

fn render_rollup_node(
    settings: &DurationSettings,
    report: &RollupReport,
    depth: usize,
    lines: &mut Vec<String>,
) {
    let indent = "  ".repeat(depth);
    let title = if report.subject.is_empty() {
        format!("#{}", report.id)
    } else {
        format!("#{} {}", report.id, report.subject)
    };
    lines.push(format!(
        "{}{}  work {}  remaining {}  {}",
        indent,
        style(title).bold(),
        hours_or_dash(settings, report.total_work),
        hours_or_dash(settings, report.total_remaining_work),
        percent_or_dash(report.total_percent_complete),
    ));
    for child in &report.children {
        render_rollup_node(settings, child, depth + 1, lines);
    }
}
