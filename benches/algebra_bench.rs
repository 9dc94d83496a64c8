//! Parse and diff throughput for algebras of increasing size.
#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use molrep::algebra::{diff, parse, FieldMap};

fn algebra_string(count: usize) -> String {
    (0..count)
        .map(|i| format!("sele={i}-{},rep=cartoon,color=chainname", i + 10))
        .collect::<Vec<_>>()
        .join("++")
}

fn parse_benchmark(c: &mut Criterion) {
    let defaults = FieldMap::from([("opacity".to_owned(), "1.0".to_owned())]);
    let mut group = c.benchmark_group("parse");

    for count in [1, 10, 100, 1000].iter() {
        let raw = algebra_string(*count);
        group.bench_function(format!("{count}_entries"), |b| {
            b.iter(|| black_box(parse(black_box(&raw), &defaults)))
        });
    }

    group.finish();
}

fn diff_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff");

    for count in [10, 100, 1000].iter() {
        let active = parse(&algebra_string(*count), &FieldMap::new());
        // Shift by half: half the entries are kept, half replaced.
        let shifted = algebra_string(*count + *count / 2);
        let next = parse(
            shifted.splitn(*count / 2 + 1, "++").last().unwrap_or(""),
            &FieldMap::new(),
        );
        group.bench_function(format!("{count}_entries"), |b| {
            b.iter(|| black_box(diff(Some(&active), black_box(&next))))
        });
    }

    group.finish();
}

criterion_group!(benches, parse_benchmark, diff_benchmark);
criterion_main!(benches);
