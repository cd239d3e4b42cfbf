//! Benchmarks for event alignment and table parsing.
//!
//! Run with: cargo bench

use abet_binary_core::{align_events, convert_content, RawEventRow};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

const OUTCOMES: [&str; 4] = [
    "Hit",
    "Missed Hit",
    "Correct Rejection",
    "Non Correction Trial Miskake",
];

/// Builds `trials` synthetic trials of marker, touches, outcome and reward.
fn synthetic_rows(trials: usize) -> Vec<RawEventRow> {
    let mut rows = Vec::with_capacity(trials * 6);
    for i in 0..trials {
        let t = i as f64 * 10.0;
        rows.push(RawEventRow::new(
            format!("{:.3}", t),
            "Condition Event",
            "Display Image",
            Some(4.0),
        ));
        for k in 1..=3 {
            rows.push(RawEventRow::new(
                format!("{:.3}", t + k as f64),
                "Input Event",
                "Centre Screen Touches",
                None,
            ));
        }
        rows.push(RawEventRow::new(
            format!("{:.3}", t + 5.0),
            "Condition Event",
            OUTCOMES[i % OUTCOMES.len()],
            Some(5.0),
        ));
        rows.push(RawEventRow::new(
            format!("{:.3}", t + 6.0),
            "Output Event",
            "Feeder #1",
            None,
        ));
    }
    rows
}

fn align_benchmark(c: &mut Criterion) {
    let rows = synthetic_rows(20_000);

    let mut group = c.benchmark_group("align_events");
    group.throughput(Throughput::Elements(rows.len() as u64));

    group.bench_function("synthetic_20k_trials", |b| {
        b.iter(|| {
            let table = align_events(black_box(&rows));
            black_box(table.len())
        })
    });

    group.finish();
}

fn convert_content_benchmark(c: &mut Criterion) {
    let mut content = String::from("Animal ID,RAT01\nDate/Time,2025-03-10 10:30:00\n");
    content.push_str("Evnt_Time,Evnt_ID,Evnt_Name,Item_Name,Alias_Name,Group_ID\n");
    for (i, row) in synthetic_rows(20_000).iter().enumerate() {
        let sub_code = row.sub_code.map(|code| code.to_string()).unwrap_or_default();
        content.push_str(&format!(
            "{},{},{},{},,{}\n",
            row.timestamp, i, row.category, row.name, sub_code
        ));
    }

    let mut group = c.benchmark_group("convert_content");
    group.throughput(Throughput::Bytes(content.len() as u64));

    group.bench_function("synthetic_20k_trials", |b| {
        b.iter(|| {
            let converted = convert_content(black_box(&content)).unwrap();
            black_box(converted.table.len())
        })
    });

    group.finish();
}

criterion_group!(benches, align_benchmark, convert_content_benchmark);
criterion_main!(benches);
