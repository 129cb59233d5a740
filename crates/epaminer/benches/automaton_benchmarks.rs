//! Automaton construction and filtering benchmarks.
//!
//! Measures the single-pass builder and the filter pipeline on synthetic
//! logs of growing size, with a fixed branching profile so runs stay
//! comparable.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use epaminer::prelude::*;

/// Synthetic log: `cases` cases of `length` events each, with every eighth
/// case deviating onto a rare branch halfway through.
fn synthetic_log(cases: usize, length: usize) -> Vec<Event<u64>> {
    let mut events = Vec::with_capacity(cases * length);
    let mut t = 0u64;
    for case in 0..cases {
        let case_id = format!("case-{case}");
        for step in 0..length {
            t += 1;
            let label = if case % 8 == 7 && step == length / 2 {
                format!("deviate-{step}")
            } else {
                format!("step-{step}")
            };
            events.push(Event::new(Activity::new(label), t, case_id.clone()));
        }
    }
    sorted_by_timestamp(events)
}

fn build_epa(cases: usize, length: usize) -> ExtendedPrefixAutomaton<u64> {
    ExtendedPrefixAutomatonBuilder::new()
        .with_log_name("bench")
        .with_events(synthetic_log(cases, length))
        .build()
        .unwrap()
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    for cases in [100usize, 1_000] {
        let length = 20;
        let events = synthetic_log(cases, length);
        group.throughput(Throughput::Elements((cases * length) as u64));
        group.bench_with_input(BenchmarkId::new("build", cases), &events, |b, events| {
            b.iter(|| {
                let epa = ExtendedPrefixAutomatonBuilder::new()
                    .with_log_name("bench")
                    .with_events(events.clone())
                    .build()
                    .unwrap();
                black_box(epa);
            });
        });
    }

    group.finish();
}

fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");
    let epa = build_epa(1_000, 20);
    group.throughput(Throughput::Elements(epa.state_count() as u64));

    group.bench_function("depth_first_statistics", |b| {
        b.iter(|| {
            let mut visitor = StatisticsVisitor::new();
            let _ = epa.accept_depth_first(&mut visitor);
            black_box(visitor.build().unwrap());
        });
    });

    group.bench_function("breadth_first_statistics", |b| {
        b.iter(|| {
            let mut visitor = StatisticsVisitor::new();
            let _ = epa.accept_breadth_first(&mut visitor);
            black_box(visitor.build().unwrap());
        });
    });

    group.finish();
}

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");
    let epa = build_epa(1_000, 20);
    group.throughput(Throughput::Elements(epa.state_count() as u64));

    group.bench_function("state_frequency", |b| {
        let filter = StateFrequencyFilter::new(0.01);
        b.iter(|| black_box(filter.apply(&epa).unwrap()));
    });

    group.bench_function("partition_frequency", |b| {
        let filter = PartitionFrequencyFilter::new(0.01);
        b.iter(|| black_box(filter.apply(&epa).unwrap()));
    });

    group.bench_function("compression", |b| {
        let filter = CompressionFilter::new();
        b.iter(|| black_box(filter.apply(&epa).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_construction, bench_traversal, bench_filters);
criterion_main!(benches);
