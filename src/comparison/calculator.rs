//! Day-over-day change computation.
//!
//! Rows from the two snapshot dates are folded into one ordered map per
//! date, the maps are full-outer-joined on entity key, and one
//! [`ChangeRecord`] is derived per key. Missing sides count as zero.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

use crate::core::{ChangeRecord, MetricChange, MetricSnapshotRow};

/// Summed counters for one entity within one snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Counters {
    users: u64,
    views: u64,
}

/// Compute one change record per entity seen on either date.
///
/// Records come back ordered by entity key. Rows dated neither `previous`
/// nor `latest` are ignored; duplicate `(entity, date)` rows are summed.
pub fn compute(
    rows: &[MetricSnapshotRow],
    previous: NaiveDate,
    latest: NaiveDate,
) -> Vec<ChangeRecord> {
    let before = snapshot_totals(rows, previous);
    let after = snapshot_totals(rows, latest);

    let keys: BTreeSet<&str> = before.keys().chain(after.keys()).copied().collect();

    keys.into_iter()
        .map(|key| {
            let prev = before.get(key).copied().unwrap_or_default();
            let last = after.get(key).copied().unwrap_or_default();
            ChangeRecord {
                entity_key: key.to_string(),
                users: metric_change(prev.users, last.users),
                views: metric_change(prev.views, last.views),
            }
        })
        .collect()
}

fn snapshot_totals(rows: &[MetricSnapshotRow], date: NaiveDate) -> BTreeMap<&str, Counters> {
    rows.iter()
        .filter(|row| row.date == date)
        .fold(BTreeMap::new(), |mut totals, row| {
            let entry: &mut Counters = totals.entry(row.entity_key.as_str()).or_default();
            entry.users = entry.users.saturating_add(row.users);
            entry.views = entry.views.saturating_add(row.views);
            totals
        })
}

/// Derive change and percent change for one counter.
pub fn metric_change(previous: u64, latest: u64) -> MetricChange {
    let change = signed_difference(previous, latest);
    MetricChange {
        previous,
        latest,
        change,
        pct_change: percent_change(previous, change),
    }
}

/// `(change / previous) * 100` rounded to one decimal.
///
/// Rounding works on the decimal expansion of the stored ratio, so 1.15
/// (held as 1.1499...) becomes 1.1 and exact halves go to the even digit.
/// A zero baseline reports 0.0 rather than an infinite ratio, including for
/// entities that are new in the latest snapshot.
pub fn percent_change(previous: u64, change: i64) -> f64 {
    if previous == 0 {
        return 0.0;
    }
    let pct = change as f64 / previous as f64 * 100.0;
    let rounded = format!("{:.1}", pct).parse::<f64>().unwrap_or(pct);
    // -0.0 would print as "-0.0%"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn signed_difference(previous: u64, latest: u64) -> i64 {
    let diff = i128::from(latest) - i128::from(previous);
    i64::try_from(diff).unwrap_or(if diff > 0 { i64::MAX } else { i64::MIN })
}
