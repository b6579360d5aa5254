//! In-memory snapshot source for tests and dry runs.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use super::SnapshotSource;
use crate::core::{DatePair, MetricSnapshotRow};
use crate::errors::Result;

/// Holds raw rows and answers queries the way a store would.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    rows: Vec<MetricSnapshotRow>,
}

impl InMemorySource {
    pub fn new(rows: Vec<MetricSnapshotRow>) -> Self {
        Self { rows }
    }
}

impl SnapshotSource for InMemorySource {
    fn recent_dates(&self) -> Result<Vec<NaiveDate>> {
        let dates: BTreeSet<NaiveDate> = self.rows.iter().map(|row| row.date).collect();
        Ok(dates.into_iter().rev().take(2).collect())
    }

    fn fetch_rows(&self, dates: DatePair) -> Result<Vec<MetricSnapshotRow>> {
        Ok(self
            .rows
            .iter()
            .filter(|row| row.date == dates.previous || row.date == dates.latest)
            .cloned()
            .collect())
    }
}
