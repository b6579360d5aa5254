//! Ranking of change records by magnitude of change.

use crate::core::{ChangeRecord, Metric};

/// A record's position in a ranked table, 1-based.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RankedEntry<'a> {
    pub rank: usize,
    pub record: &'a ChangeRecord,
}

/// Top `limit` records by absolute change of `metric`, descending.
///
/// Every record tied with the last included value is kept, so the result
/// may be longer than `limit`. Equal magnitudes are ordered by entity key.
pub fn rank(records: &[ChangeRecord], metric: Metric, limit: usize) -> Vec<RankedEntry<'_>> {
    let mut ordered: Vec<&ChangeRecord> = records.iter().collect();
    ordered.sort_by(|a, b| {
        magnitude(b, metric)
            .cmp(&magnitude(a, metric))
            .then_with(|| a.entity_key.cmp(&b.entity_key))
    });

    let cutoff = match limit.checked_sub(1).and_then(|idx| ordered.get(idx)) {
        Some(last) => magnitude(last, metric),
        None if limit == 0 => return Vec::new(),
        None => 0,
    };

    ordered
        .into_iter()
        .enumerate()
        .take_while(|(idx, record)| *idx < limit || magnitude(record, metric) == cutoff)
        .map(|(idx, record)| RankedEntry {
            rank: idx + 1,
            record,
        })
        .collect()
}

fn magnitude(record: &ChangeRecord, metric: Metric) -> u64 {
    record.metric(metric).change.unsigned_abs()
}

/// Gainer/decliner counts and net change over a whole record set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    pub gainers: usize,
    pub decliners: usize,
    pub flat: usize,
    pub total_change: i128,
}

impl ChangeSummary {
    pub fn from_records(records: &[ChangeRecord], metric: Metric) -> Self {
        records
            .iter()
            .map(|record| record.metric(metric).change)
            .fold(Self::default(), |mut summary, change| {
                match change.signum() {
                    1 => summary.gainers += 1,
                    -1 => summary.decliners += 1,
                    _ => summary.flat += 1,
                }
                summary.total_change += i128::from(change);
                summary
            })
    }

    pub fn total(&self) -> usize {
        self.gainers + self.decliners + self.flat
    }
}
