//! Snapshot comparison: change computation and ranking.

pub mod calculator;
pub mod ranker;

pub use calculator::{compute, metric_change, percent_change};
pub use ranker::{rank, ChangeSummary, RankedEntry};
