//! Criterion benchmarks for the nearest-neighbour sequencer.
//!
//! Measures sequencing time across input sizes to catch regressions in the
//! quadratic scan.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package waymark-sequencer
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use waymark_core::{Coordinate, Sequencer};
use waymark_sequencer::NearestNeighbourSequencer;


use bench_support::{BENCHMARK_SEED, generate_clustered_waypoints};

/// Input sizes to benchmark.
const PROBLEM_SIZES: &[usize] = &[10, 100, 1_000];

/// Start of every benchmark sequence.
const START: Coordinate = Coordinate::new(41.7, 44.8);

fn bench_sequence_times(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence_time");

    for &size in PROBLEM_SIZES {
        let waypoints = generate_clustered_waypoints(size, BENCHMARK_SEED);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &waypoints, |b, input| {
            b.iter(|| NearestNeighbourSequencer.sequence(START, input));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sequence_times);
criterion_main!(benches);
