//! Benchmarks for the spatial map and span merging.
//!
//! Run with: cargo bench -p trellis-render --bench spatial_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use trellis_core::Region;
use trellis_render::{SpatialEntry, SpatialMap, inline_ranges};

/// A scrolling column of `n` rows, 80 cells wide, three lines each.
fn column(n: u32) -> Vec<SpatialEntry<u32>> {
    (0..n)
        .map(|i| SpatialEntry::new(Region::new(0, i as i32 * 3, 80, 3), i))
        .collect()
}

// =============================================================================
// SpatialMap
// =============================================================================

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial/insert");

    for n in [100u32, 1_000, 10_000] {
        group.throughput(Throughput::Elements(u64::from(n)));
        let entries = column(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &entries, |b, entries| {
            b.iter(|| {
                let mut map = SpatialMap::default();
                map.insert(entries.iter().copied());
                black_box(map)
            })
        });
    }

    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial/query");
    let viewport = Region::new(0, 0, 80, 24);

    for n in [100u32, 1_000, 10_000] {
        let mut map = SpatialMap::default();
        map.insert(column(n));
        let scrolled = viewport.translate(trellis_core::Offset::new(0, (n as i32 * 3) / 2));
        group.bench_with_input(BenchmarkId::new("viewport", n), &scrolled, |b, query| {
            b.iter(|| black_box(map.get_values_in_region(*query)))
        });
    }

    group.finish();
}

// =============================================================================
// inline_ranges
// =============================================================================

fn bench_inline_ranges(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial/inline_ranges");

    for n in [10i32, 100, 1_000] {
        // Staggered, overlapping selections.
        let regions: Vec<Region> = (0..n).map(|i| Region::new(i % 40, i / 2, 20, 2)).collect();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &regions, |b, regions| {
            b.iter(|| black_box(inline_ranges(regions).count()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_query, bench_inline_ranges);
criterion_main!(benches);
