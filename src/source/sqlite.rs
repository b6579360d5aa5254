//! SQLite-backed snapshot source.
//!
//! Expects a table of raw daily rows with the columns `date`,
//! `domain_name`, `total_activeUsers` and `total_screenPageViews`. Several
//! rows per domain and day are allowed; queries aggregate them.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OpenFlags};
use std::path::{Path, PathBuf};

use super::SnapshotSource;
use crate::core::{DatePair, MetricSnapshotRow};
use crate::errors::{ReportError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct SqliteSnapshotSource {
    conn: Connection,
    table: String,
    path: PathBuf,
}

impl std::fmt::Debug for SqliteSnapshotSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteSnapshotSource")
            .field("path", &self.path)
            .field("table", &self.table)
            .finish()
    }
}

impl SqliteSnapshotSource {
    /// Open `path` read-only.
    ///
    /// A missing database file or an unusable table name is a configuration
    /// error and is reported before any query runs.
    pub fn open(path: &Path, table: &str) -> Result<Self> {
        if !is_sql_identifier(table) {
            return Err(ReportError::configuration(format!(
                "Invalid source table name: {:?}",
                table
            )));
        }
        if !path.is_file() {
            return Err(ReportError::configuration(format!(
                "Snapshot database not found: {}\nPlease set [source] database in .domaindiff.toml \
                 or DOMAINDIFF_DATABASE to point to your metrics database.",
                path.display()
            )));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        tracing::info!("Using snapshot database: {}", path.display());

        Ok(Self {
            conn,
            table: table.to_string(),
            path: path.to_path_buf(),
        })
    }
}

impl SnapshotSource for SqliteSnapshotSource {
    fn recent_dates(&self) -> Result<Vec<NaiveDate>> {
        let sql = format!(
            "SELECT DISTINCT DATE(date) AS snapshot_date
             FROM {}
             WHERE DATE(date) IS NOT NULL
             ORDER BY snapshot_date DESC
             LIMIT 2",
            self.table
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let raw = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        raw.iter().map(|s| parse_date(s)).collect()
    }

    fn fetch_rows(&self, dates: DatePair) -> Result<Vec<MetricSnapshotRow>> {
        let sql = format!(
            "SELECT DATE(date) AS snapshot_date,
                    domain_name,
                    CAST(SUM(total_activeUsers) AS INTEGER),
                    CAST(SUM(total_screenPageViews) AS INTEGER)
             FROM {}
             WHERE DATE(date) IN (?1, ?2)
             GROUP BY snapshot_date, domain_name
             ORDER BY domain_name, snapshot_date",
            self.table
        );
        let previous = dates.previous.format(DATE_FORMAT).to_string();
        let latest = dates.latest.format(DATE_FORMAT).to_string();

        let mut stmt = self.conn.prepare(&sql)?;
        let raw = stmt
            .query_map(params![previous, latest], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<i64>>(2)?,
                    row.get::<_, Option<i64>>(3)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        raw.into_iter()
            .map(|(date, domain, users, views)| {
                Ok(MetricSnapshotRow {
                    date: parse_date(&date)?,
                    users: non_negative(users, &domain, "total_activeUsers")?,
                    views: non_negative(views, &domain, "total_screenPageViews")?,
                    entity_key: domain,
                })
            })
            .collect()
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| ReportError::InvalidData(format!("unparseable date {:?}: {}", raw, e)))
}

fn non_negative(value: Option<i64>, domain: &str, column: &str) -> Result<u64> {
    let value = value.unwrap_or(0);
    u64::try_from(value).map_err(|_| {
        ReportError::InvalidData(format!("negative {} for {}: {}", column, domain, value))
    })
}

fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use tempfile::TempDir;

    fn fixture(dir: &TempDir, rows: &[(&str, &str, Option<i64>, i64)]) -> PathBuf {
        let path = dir.path().join("metrics.sqlite");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE dap_domain (
                date TEXT NOT NULL,
                domain_name TEXT NOT NULL,
                total_activeUsers INTEGER,
                total_screenPageViews INTEGER
            );",
        )
        .unwrap();
        for (date, domain, users, views) in rows {
            conn.execute(
                "INSERT INTO dap_domain VALUES (?1, ?2, ?3, ?4)",
                params![date, domain, users, views],
            )
            .unwrap();
        }
        path
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_missing_database_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let err = SqliteSnapshotSource::open(&dir.path().join("nope.sqlite"), "dap_domain")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_invalid_table_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let path = fixture(&dir, &[]);
        let err = SqliteSnapshotSource::open(&path, "dap; DROP TABLE x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_recent_dates_distinct_descending() {
        let dir = TempDir::new().unwrap();
        let path = fixture(
            &dir,
            &[
                ("2024-01-01", "a.com", Some(1), 1),
                ("2024-01-02 08:00:00", "a.com", Some(1), 1),
                ("2024-01-02 09:00:00", "b.com", Some(1), 1),
                ("2024-01-03", "a.com", Some(1), 1),
            ],
        );
        let source = SqliteSnapshotSource::open(&path, "dap_domain").unwrap();

        assert_eq!(source.recent_dates().unwrap(), vec![day(3), day(2)]);
    }

    #[test]
    fn test_fetch_rows_aggregates_per_day() {
        let dir = TempDir::new().unwrap();
        let path = fixture(
            &dir,
            &[
                ("2024-01-01", "a.com", Some(10), 100),
                ("2024-01-02 01:00:00", "a.com", Some(5), 50),
                ("2024-01-02 02:00:00", "a.com", Some(7), 70),
                ("2024-01-02", "b.com", None, 3),
                ("2023-12-31", "a.com", Some(999), 999),
            ],
        );
        let source = SqliteSnapshotSource::open(&path, "dap_domain").unwrap();

        let rows = source.fetch_rows(DatePair::new(day(1), day(2))).unwrap();

        assert_eq!(
            rows,
            vec![
                MetricSnapshotRow::new("a.com", day(1), 10, 100),
                MetricSnapshotRow::new("a.com", day(2), 12, 120),
                MetricSnapshotRow::new("b.com", day(2), 0, 3),
            ]
        );
    }

    #[test]
    fn test_negative_counter_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = fixture(&dir, &[("2024-01-02", "bad.com", Some(-4), 1)]);
        let source = SqliteSnapshotSource::open(&path, "dap_domain").unwrap();

        let err = source.fetch_rows(DatePair::new(day(1), day(2))).unwrap_err();
        assert!(matches!(err, ReportError::InvalidData(_)));
        assert_eq!(err.kind(), ErrorKind::Unexpected);
    }

    #[test]
    fn test_is_sql_identifier() {
        assert!(is_sql_identifier("dap_domain"));
        assert!(is_sql_identifier("_t1"));
        assert!(!is_sql_identifier("1abc"));
        assert!(!is_sql_identifier("a.b"));
        assert!(!is_sql_identifier(""));
    }
}
