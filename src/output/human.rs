use colored::Colorize;
use comfy_table::{Cell, Color, Table, presets::UTF8_FULL};

use crate::core::health::OverallHealth;
use crate::core::session::DashboardReport;
use crate::models::{Metric, Status, ThresholdPair, ThresholdTable};

fn status_color(status: Status) -> Color {
    match status {
        Status::Good => Color::Green,
        Status::Warning => Color::DarkYellow,
        Status::Error => Color::Red,
    }
}

/// Colored banner text for the overall verdict.
pub fn format_overall(overall: OverallHealth) -> String {
    let label = overall.to_string();
    match overall {
        OverallHealth::Good => label.green().bold().to_string(),
        OverallHealth::Warning => label.yellow().bold().to_string(),
        OverallHealth::Critical => label.red().bold().to_string(),
    }
}

/// One-line rendering of a metric.
pub fn format_metric(m: &Metric) -> String {
    let mut line = format!("{} = {} [{}]", m.name, m.value, m.status);
    if let (Some(good), Some(warning)) = (m.good_threshold, m.warning_threshold) {
        line.push_str(&format!("  (good {}, warning {})", good, warning));
    }
    if let Some(ref detail) = m.detail {
        line.push_str(&format!("  # {}", detail));
    }
    line
}

/// Pretty-print the whole dashboard.
pub fn format_dashboard(report: &DashboardReport) -> String {
    let mut out = format!(
        "=== Health Dashboard: {} ===\nActivity: {}\n",
        format_overall(report.overall),
        report.activity_state
    );

    if report.metrics.is_empty() {
        out.push_str("No metrics.");
        return out;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Metric", "Value", "Status", "Details"]);
    for m in &report.metrics {
        table.add_row(vec![
            Cell::new(&m.name),
            Cell::new(m.value.to_string()),
            Cell::new(m.status.to_string()).fg(status_color(m.status)),
            Cell::new(m.detail.as_deref().unwrap_or("")),
        ]);
    }
    out.push_str(&table.to_string());

    if report.custom_count > 0 {
        out.push_str(&format!("\n{} custom metric(s)", report.custom_count));
    }
    out
}

fn threshold_row(name: &str, pair: &ThresholdPair) -> Vec<Cell> {
    vec![
        Cell::new(name),
        Cell::new(pair.good.to_string()).fg(Color::Green),
        Cell::new(pair.warning.to_string()).fg(Color::DarkYellow),
    ]
}

/// Pretty-print a threshold table.
pub fn format_thresholds(activity: &str, table: &ThresholdTable) -> String {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL)
        .set_header(vec!["Metric", "Good", "Warning"])
        .add_row(threshold_row("Heart Rate", &table.heart_rate))
        .add_row(threshold_row("Blood Pressure", &table.blood_pressure));
    format!("Thresholds ({})\n{}", activity, t)
}
