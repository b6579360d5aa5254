//! Snapshot sources.
//!
//! A [`SnapshotSource`] answers the two questions a run asks of the
//! analytical store: which snapshot dates are newest, and what the
//! per-domain counters were on two given dates. Query details stay behind
//! the trait so the comparison core never sees them.

pub mod memory;
pub mod sqlite;

use chrono::NaiveDate;

use crate::core::{DatePair, MetricSnapshotRow};
use crate::errors::{ReportError, Result};

pub use memory::InMemorySource;
pub use sqlite::SqliteSnapshotSource;

/// Read access to per-domain daily metrics.
pub trait SnapshotSource {
    /// Up to two most recent distinct snapshot dates, newest first.
    fn recent_dates(&self) -> Result<Vec<NaiveDate>>;

    /// Rows for `dates.previous` and `dates.latest`, aggregated per
    /// `(date, entity_key)`.
    fn fetch_rows(&self, dates: DatePair) -> Result<Vec<MetricSnapshotRow>>;
}

/// Pick `(previous, latest)` from a newest-first date list.
///
/// Fails with [`ReportError::InsufficientData`] when fewer than two
/// distinct dates are available.
pub fn select_date_pair(dates: &[NaiveDate]) -> Result<DatePair> {
    let mut distinct = dates.to_vec();
    distinct.sort_unstable_by(|a, b| b.cmp(a));
    distinct.dedup();

    match distinct.as_slice() {
        [latest, previous, ..] => Ok(DatePair::new(*previous, *latest)),
        other => Err(ReportError::InsufficientData { found: other.len() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
    }

    #[test]
    fn test_select_date_pair_newest_two() {
        let pair = select_date_pair(&[day(9), day(8)]).unwrap();
        assert_eq!(pair, DatePair::new(day(8), day(9)));
    }

    #[test]
    fn test_select_date_pair_tolerates_unordered_duplicates() {
        let pair = select_date_pair(&[day(3), day(9), day(9), day(5)]).unwrap();
        assert_eq!(pair, DatePair::new(day(5), day(9)));
    }

    #[test]
    fn test_select_date_pair_insufficient() {
        let err = select_date_pair(&[day(1)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
        assert!(matches!(err, ReportError::InsufficientData { found: 1 }));

        let err = select_date_pair(&[day(1), day(1)]).unwrap_err();
        assert!(matches!(err, ReportError::InsufficientData { found: 1 }));

        let err = select_date_pair(&[]).unwrap_err();
        assert!(matches!(err, ReportError::InsufficientData { found: 0 }));
    }
}
