//! Benchmarks for change computation and ranking over large snapshots.

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use domaindiff::comparison::{compute, rank, ChangeSummary};
use domaindiff::core::{Metric, MetricSnapshotRow};
use std::hint::black_box;

fn dates() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
    )
}

// Most domains appear on both days; every tenth is new and every seventh vanished.
fn create_snapshot(domains: usize) -> Vec<MetricSnapshotRow> {
    let (previous, latest) = dates();
    let mut rows = Vec::with_capacity(domains * 2);
    for i in 0..domains {
        let key = format!("site{:06}.gov", i);
        let base = (i as u64 * 7_919) % 250_000;
        if i % 10 != 0 {
            rows.push(MetricSnapshotRow::new(key.clone(), previous, base, base * 3));
        }
        if i % 7 != 0 {
            let drift = (i as u64 * 31) % 5_000;
            rows.push(MetricSnapshotRow::new(key, latest, base + drift, (base * 3).saturating_sub(drift / 2)));
        }
    }
    rows
}

fn bench_compute(c: &mut Criterion) {
    let (previous, latest) = dates();
    let mut group = c.benchmark_group("compute");

    for size in [1_000, 10_000, 50_000] {
        let rows = create_snapshot(size);
        group.bench_with_input(BenchmarkId::new("changes", size), &rows, |b, rows| {
            b.iter(|| compute(black_box(rows), previous, latest))
        });
    }

    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let (previous, latest) = dates();
    let mut group = c.benchmark_group("rank");

    for size in [1_000, 10_000, 50_000] {
        let records = compute(&create_snapshot(size), previous, latest);
        group.bench_with_input(BenchmarkId::new("top_10_users", size), &records, |b, records| {
            b.iter(|| rank(black_box(records), Metric::Users, 10))
        });
        group.bench_with_input(BenchmarkId::new("summary_views", size), &records, |b, records| {
            b.iter(|| ChangeSummary::from_records(black_box(records), Metric::Views))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compute, bench_rank);
criterion_main!(benches);
