//! Flat CSV report containing every change record.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::core::{ChangeRecord, DatePair};
use crate::errors::{ReportError, Result};

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    domain_name: &'a str,
    prev_users: u64,
    latest_users: u64,
    users_change: i64,
    users_pct_change: f64,
    prev_views: u64,
    latest_views: u64,
    views_change: i64,
    views_pct_change: f64,
    report_date: &'a str,
    previous_date: String,
    latest_date: String,
}

/// Encode all records as CSV with run metadata columns.
///
/// Rows are ordered by `users_change` descending, then domain name.
pub fn render_csv(
    records: &[ChangeRecord],
    dates: DatePair,
    generated_at: NaiveDateTime,
) -> Result<Vec<u8>> {
    let report_date = generated_at.format("%Y-%m-%d %H:%M:%S").to_string();

    let mut ordered: Vec<&ChangeRecord> = records.iter().collect();
    ordered.sort_by(|a, b| {
        b.users
            .change
            .cmp(&a.users.change)
            .then_with(|| a.entity_key.cmp(&b.entity_key))
    });

    let mut writer = csv::Writer::from_writer(Vec::new());
    if ordered.is_empty() {
        writer.write_record(HEADER)?;
    }
    for record in ordered {
        writer.serialize(CsvRow {
            domain_name: &record.entity_key,
            prev_users: record.users.previous,
            latest_users: record.users.latest,
            users_change: record.users.change,
            users_pct_change: record.users.pct_change,
            prev_views: record.views.previous,
            latest_views: record.views.latest,
            views_change: record.views.change,
            views_pct_change: record.views.pct_change,
            report_date: &report_date,
            previous_date: dates.previous.to_string(),
            latest_date: dates.latest.to_string(),
        })?;
    }

    writer
        .into_inner()
        .map_err(|e| ReportError::Io(e.into_error()))
}

/// Column order of the CSV artifact.
pub const HEADER: [&str; 12] = [
    "domain_name",
    "prev_users",
    "latest_users",
    "users_change",
    "users_pct_change",
    "prev_views",
    "latest_views",
    "views_change",
    "views_pct_change",
    "report_date",
    "previous_date",
    "latest_date",
];
