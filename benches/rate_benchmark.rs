// ============================================================================
// Rate Conversion Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Lookup - O(1) bps -> rate reads from the packed table
// 2. Exponentiation - rpow and rate -> bps over a full year
// 3. Packing - offline table construction
// ============================================================================

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rate_conv::prelude::*;
use std::hint::black_box;

const FIXTURE: &str = include_str!("../data/RatesMapping.sol");

fn fixture_mapping() -> RateMapping {
    RateMapping::parse(FIXTURE, 5000).expect("fixture parses")
}

// ============================================================================
// Lookup Benchmarks
// ============================================================================

fn benchmark_lookup(c: &mut Criterion) {
    let mapping = fixture_mapping();
    let blob = TablePacker::new().pack(mapping.iter()).expect("fixture packs");
    let conv = RateConverter::from_blob(blob);

    let mut group = c.benchmark_group("lookup");
    for bps in [0u64, 3, 250, 400] {
        group.bench_with_input(BenchmarkId::new("bps_to_rate", bps), &bps, |b, &bps| {
            b.iter(|| black_box(conv.bps_to_rate(black_box(bps))))
        });
    }
    group.finish();
}

// ============================================================================
// Exponentiation Benchmarks
// ============================================================================

fn benchmark_rpow(c: &mut Criterion) {
    let rate = Ray::parse_raw("1000000000315522921573372069").expect("valid rate");

    let mut group = c.benchmark_group("rpow");
    for n in [2u64, 86_400, SECONDS_PER_YEAR] {
        group.bench_with_input(BenchmarkId::new("rpow", n), &n, |b, &n| {
            b.iter(|| black_box(rpow(black_box(rate), n)))
        });
    }
    group.bench_function("rate_to_bps", |b| {
        b.iter(|| black_box(rate_to_bps(black_box(rate))))
    });
    group.finish();
}

// ============================================================================
// Packing Benchmarks
// ============================================================================

fn benchmark_pack(c: &mut Criterion) {
    let mapping = fixture_mapping();

    c.bench_function("pack_401_entries", |b| {
        b.iter(|| black_box(TablePacker::new().pack(mapping.iter())))
    });

    c.bench_function("solve_per_second_rate", |b| {
        b.iter(|| black_box(RateSolver::per_second_rate(black_box(250))))
    });
}

criterion_group!(benches, benchmark_lookup, benchmark_rpow, benchmark_pack);
criterion_main!(benches);
