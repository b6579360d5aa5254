//! Fixed-width text report.

use chrono::NaiveDateTime;
use std::fmt::Write;

use crate::comparison::{rank, ChangeSummary};
use crate::core::{ChangeRecord, DatePair, Metric};
use crate::formatting::{format_number, format_percentage, Direction};

pub const REPORT_WIDTH: usize = 120;
pub const REPORT_TITLE: &str = "DOMAIN ANALYSIS REPORT";

/// Render the full text report: header, one ranked table per metric, footer.
pub fn render_report(
    records: &[ChangeRecord],
    dates: DatePair,
    generated_at: NaiveDateTime,
    top_n: usize,
) -> String {
    let rule = "=".repeat(REPORT_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "{}", REPORT_TITLE);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "Data Range: {}", dates);
    let _ = writeln!(out, "Total Domains Analyzed: {}", records.len());

    for (idx, metric) in Metric::ALL.into_iter().enumerate() {
        out.push_str(&render_metric_table(records, metric, dates, idx + 1, top_n));
        out.push_str("\n\n");
    }

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "End of Report");
    let _ = writeln!(out, "{}", rule);
    out
}

/// Render one ranked table with its summary line.
///
/// The summary counts and total cover every record, not only the ranked rows.
pub fn render_metric_table(
    records: &[ChangeRecord],
    metric: Metric,
    dates: DatePair,
    table_number: usize,
    top_n: usize,
) -> String {
    let rule = "=".repeat(REPORT_WIDTH);
    let thin_rule = "-".repeat(REPORT_WIDTH);
    let mut lines = vec![
        format!("\n{}", rule),
        format!(
            "TABLE {}: TOP {} DOMAINS BY {} CHANGE (BY ABSOLUTE VOLUME)",
            table_number,
            top_n,
            metric.title()
        ),
        rule.clone(),
        String::new(),
        format!(
            "{:<6} {:<40} {:<15} {:<15} {:<15} {:<12} {:<4}",
            "Rank",
            "Domain",
            dates.latest.to_string(),
            dates.previous.to_string(),
            "Change",
            "Change %",
            "Dir"
        ),
        thin_rule.clone(),
    ];

    for entry in rank(records, metric, top_n) {
        let values = entry.record.metric(metric);
        lines.push(format!(
            "{:<6} {:<40} {:<15} {:<15} {:<15} {:<12} {:<4}",
            entry.rank,
            entry.record.entity_key,
            format_number(values.latest),
            format_number(values.previous),
            format_number(values.change),
            format_percentage(values.pct_change),
            Direction::of(values.change)
        ));
    }

    let summary = ChangeSummary::from_records(records, metric);
    lines.push(thin_rule);
    lines.push(format!(
        "Summary: {} gainers, {} decliners | Total change: {}",
        summary.gainers,
        summary.decliners,
        format_number(summary.total_change)
    ));
    lines.push(rule);

    lines.join("\n")
}
