// Test utility module for domaindiff integration tests
#![allow(dead_code)]

use chrono::NaiveDate;
use domaindiff::core::{ChangeRecord, MetricSnapshotRow};
use domaindiff::comparison::metric_change;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

/// Raw row as stored in the metrics table: (date, domain, users, views).
pub type RawRow<'a> = (&'a str, &'a str, i64, i64);

/// Create `<dir>/metrics.sqlite` with a `dap_domain` table holding `rows`.
pub fn create_metrics_db(dir: &Path, rows: &[RawRow<'_>]) -> PathBuf {
    let path = dir.join("metrics.sqlite");
    let conn = Connection::open(&path).expect("open fixture database");
    conn.execute_batch(
        "CREATE TABLE dap_domain (
            date TEXT NOT NULL,
            domain_name TEXT NOT NULL,
            total_activeUsers INTEGER,
            total_screenPageViews INTEGER
        );",
    )
    .expect("create fixture table");
    for (date, domain, users, views) in rows {
        conn.execute(
            "INSERT INTO dap_domain VALUES (?1, ?2, ?3, ?4)",
            params![date, domain, users, views],
        )
        .expect("insert fixture row");
    }
    path
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid fixture date")
}

pub fn row(key: &str, day: &str, users: u64, views: u64) -> MetricSnapshotRow {
    MetricSnapshotRow::new(key, date(day), users, views)
}

/// Change record with only the users counter populated.
pub fn users_record(key: &str, previous: u64, latest: u64) -> ChangeRecord {
    ChangeRecord {
        entity_key: key.to_string(),
        users: metric_change(previous, latest),
        views: metric_change(0, 0),
    }
}
