//! Benchmarks for loading, aggregation and chart rendering
//!
//! Run with: cargo bench

use chrono::{Duration, NaiveDate};
use covid_scenes::aggregate::{latest_state_snapshot, national_series, state_series};
use covid_scenes::dataset::{CaseRecord, Dataset, DatasetLoader};
use covid_scenes::scenes::{render_national, render_state_detail};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::fmt::Write;

const STATES: usize = 55;

/// Cumulative counts for `STATES` states over `days` days
fn create_test_records(days: usize) -> Vec<CaseRecord> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 21).unwrap();
    let mut records = Vec::with_capacity(days * STATES);

    for day in 0..days {
        let date = start + Duration::days(day as i64);
        for state in 0..STATES {
            let cases = ((day + 1) * (state + 1) * 37) as i64;
            records.push(CaseRecord::new(date, format!("State {:02}", state), cases, cases / 60));
        }
    }

    records
}

fn create_test_csv(days: usize) -> String {
    let mut csv = String::from("date,state,fips,cases,deaths\n");
    for (i, record) in create_test_records(days).iter().enumerate() {
        let _ = writeln!(
            csv,
            "{},{},{:02},{},{}",
            record.date,
            record.state,
            i % STATES,
            record.cases,
            record.deaths
        );
    }
    csv
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    let loader = DatasetLoader::new();

    for days in [30, 365] {
        let csv = create_test_csv(days);
        group.throughput(Throughput::Elements((days * STATES) as u64));

        group.bench_function(format!("load_{}_days", days), |b| {
            b.iter(|| loader.load_str(black_box(&csv)).unwrap())
        });
    }

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for days in [30, 365, 1000] {
        let dataset = Dataset::new(create_test_records(days));
        group.throughput(Throughput::Elements(dataset.len() as u64));

        group.bench_function(format!("national_{}_days", days), |b| {
            b.iter(|| national_series(black_box(&dataset)))
        });

        group.bench_function(format!("snapshot_{}_days", days), |b| {
            b.iter(|| latest_state_snapshot(black_box(&dataset)))
        });

        group.bench_function(format!("state_series_{}_days", days), |b| {
            b.iter(|| state_series(black_box(&dataset), "State 17"))
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let dataset = Dataset::new(create_test_records(1000));
    let national = national_series(&dataset);
    let series = state_series(&dataset, "State 17");

    group.bench_function("national_chart", |b| {
        b.iter(|| render_national(black_box(&national)).to_svg())
    });

    group.bench_function("state_detail_chart", |b| {
        b.iter(|| render_state_detail("State 17", black_box(&series)).to_svg())
    });

    group.finish();
}

criterion_group!(benches, bench_load, bench_aggregate, bench_render);
criterion_main!(benches);
