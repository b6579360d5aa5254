use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One entity's counters for one snapshot date.
///
/// Produced by a [`crate::source::SnapshotSource`]. Sources are expected to
/// pre-aggregate by `(date, entity_key)`, but consumers must not rely on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSnapshotRow {
    pub entity_key: String,
    pub date: NaiveDate,
    pub users: u64,
    pub views: u64,
}

impl MetricSnapshotRow {
    pub fn new(entity_key: impl Into<String>, date: NaiveDate, users: u64, views: u64) -> Self {
        Self {
            entity_key: entity_key.into(),
            date,
            users,
            views,
        }
    }
}

/// The two tracked counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    Users,
    Views,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Users, Metric::Views];

    /// Heading used in report table titles.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Users => "ACTIVE USERS",
            Self::Views => "PAGEVIEWS",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Users => write!(f, "users"),
            Self::Views => write!(f, "views"),
        }
    }
}

/// Previous/latest values of one counter plus the derived deltas.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricChange {
    pub previous: u64,
    pub latest: u64,
    /// `latest - previous`
    pub change: i64,
    /// Percent change rounded to one decimal; 0.0 when `previous` is 0.
    pub pct_change: f64,
}

/// Comparison of one entity between the two snapshots.
///
/// Built once per run by [`crate::comparison::compute`] and never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub entity_key: String,
    pub users: MetricChange,
    pub views: MetricChange,
}

impl ChangeRecord {
    pub fn metric(&self, metric: Metric) -> &MetricChange {
        match metric {
            Metric::Users => &self.users,
            Metric::Views => &self.views,
        }
    }
}

/// The two snapshot dates being compared, `previous < latest`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePair {
    pub previous: NaiveDate,
    pub latest: NaiveDate,
}

impl DatePair {
    pub fn new(previous: NaiveDate, latest: NaiveDate) -> Self {
        Self { previous, latest }
    }
}

impl std::fmt::Display for DatePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.previous, self.latest)
    }
}
