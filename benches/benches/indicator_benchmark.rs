//! Normalization and indicator throughput on synthetic daily histories.
//!
//! Run with: `cargo bench --package pregao-bench`

use chrono::{Days, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pregao_lib::prelude::*;
use pregao_lib::{CsvFormatter, Formatter, RawCell};
use std::hint::black_box;

/// History lengths in sessions: one year, two years, ten years.
const SIZES: [u32; 3] = [252, 504, 2520];

/// Builds a nested (field, symbol) table with a wobbly upward drift.
fn synthetic_table(sessions: u32) -> RawTable {
    let start = NaiveDate::from_ymd_opt(2015, 1, 2).unwrap_or(NaiveDate::MIN);
    let index = (0..sessions)
        .map(|i| start + Days::new(u64::from(i)))
        .collect();

    let close = |i: u32| {
        let t = f64::from(i);
        30.0 + 0.02 * t + 1.5 * (t / 7.0).sin()
    };
    let column = |offset: f64| -> Vec<RawCell> {
        (0..sessions).map(|i| RawCell::from(close(i) + offset)).collect()
    };

    RawTable::new(index)
        .with_column(("Open", "PETR4.SA"), column(-0.1))
        .with_column(("High", "PETR4.SA"), column(0.4))
        .with_column(("Low", "PETR4.SA"), column(-0.4))
        .with_column(("Close", "PETR4.SA"), column(0.0))
        .with_column(
            ("Volume", "PETR4.SA"),
            (0..sessions).map(|i| RawCell::from(1.0e6 + f64::from(i))).collect(),
        )
}

fn normalize_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for sessions in SIZES {
        let table = synthetic_table(sessions);
        group.throughput(Throughput::Elements(u64::from(sessions)));
        group.bench_with_input(BenchmarkId::from_parameter(sessions), &table, |b, table| {
            b.iter(|| normalize(black_box(table)));
        });
    }

    group.finish();
}

fn engine_benchmark(c: &mut Criterion) {
    let engine = IndicatorEngine::with_defaults();
    let mut group = c.benchmark_group("engine");

    for sessions in SIZES {
        let Ok(normalized) = normalize(&synthetic_table(sessions)) else {
            continue;
        };
        group.throughput(Throughput::Elements(u64::from(sessions)));
        group.bench_with_input(
            BenchmarkId::from_parameter(sessions),
            &normalized.series,
            |b, series| {
                b.iter(|| engine.apply(black_box(series.clone())));
            },
        );
    }

    group.finish();
}

fn csv_benchmark(c: &mut Criterion) {
    let engine = IndicatorEngine::with_defaults();
    let formatter = CsvFormatter::new();
    let mut group = c.benchmark_group("csv");

    for sessions in SIZES {
        let Ok(normalized) = normalize(&synthetic_table(sessions)) else {
            continue;
        };
        let series = engine.apply(normalized.series);
        group.throughput(Throughput::Elements(u64::from(sessions)));
        group.bench_with_input(BenchmarkId::from_parameter(sessions), &series, |b, series| {
            b.iter(|| {
                let mut out = Vec::with_capacity(series.len() * 96);
                let _ = formatter.write_series(black_box(series), &mut out);
                out
            });
        });
    }

    group.finish();
}

criterion_group!(benches, normalize_benchmark, engine_benchmark, csv_benchmark);
criterion_main!(benches);
