//! Performance benchmarks for FastG3d
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fast_g3d::core::{reg2bin, reg2bins, G3dRecord, Haplotype, ScaleEngine, SpatialIndex};
use fast_g3d::formats::{parse_threedg_bytes, ThreedgOptions};

/// Build a synthetic whole-chromosome index at 20 kb resolution
fn synthetic_index(records: usize) -> SpatialIndex {
    let mut index = SpatialIndex::new(20000);
    for i in 0..records {
        let start = i as u64 * 20000;
        index.insert(G3dRecord {
            chrom: "chr1".to_string(),
            start,
            end: start + 20000,
            x: (i as f64).sin(),
            y: (i as f64).cos(),
            z: i as f64 * 0.001,
            haplotype: if i % 2 == 0 { Haplotype::Paternal } else { Haplotype::Maternal },
        });
    }
    index
}

/// Benchmark single-bin computation
fn bench_reg2bin(c: &mut Criterion) {
    c.bench_function("reg2bin", |b| {
        b.iter(|| {
            let bin = reg2bin(black_box(1_000_000), black_box(1_020_000));
            black_box(bin)
        })
    });
}

/// Benchmark candidate-bin enumeration at several query widths
fn bench_reg2bins(c: &mut Criterion) {
    let mut group = c.benchmark_group("reg2bins");

    for width in [20_000u64, 1_000_000, 50_000_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(width), width, |b, &width| {
            b.iter(|| {
                let bins = reg2bins(black_box(10_000_000), black_box(10_000_000 + width));
                black_box(bins)
            })
        });
    }

    group.finish();
}

/// Benchmark range queries against a loaded index
fn bench_range_query(c: &mut Criterion) {
    let index = synthetic_index(10_000);

    c.bench_function("query_range", |b| {
        b.iter(|| {
            let hits = index.query_range(black_box("chr1"), black_box(50_000_000), black_box(51_000_000));
            black_box(hits)
        })
    });

    c.bench_function("query_range_exact", |b| {
        b.iter(|| {
            let hits =
                index.query_range_exact(black_box("chr1"), black_box(50_000_000), black_box(51_000_000));
            black_box(hits)
        })
    });
}

/// Benchmark rescaling at increasing index sizes
fn bench_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("scale");
    let engine = ScaleEngine::new(2).unwrap();

    for size in [1_000usize, 10_000].iter() {
        let index = synthetic_index(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &index, |b, index| {
            b.iter(|| {
                let scaled = engine.scale(black_box(index)).unwrap();
                black_box(scaled)
            })
        });
    }

    group.finish();
}

/// Benchmark .3dg line parsing
fn bench_threedg_parsing(c: &mut Criterion) {
    let mut data = Vec::new();
    for i in 0..1000u64 {
        data.extend_from_slice(
            format!("1(pat)\t{}\t0.791336\t7.067414\t-3.548617\n", i * 20000).as_bytes(),
        );
    }
    let options = ThreedgOptions::default();

    c.bench_function("threedg_parse_1k_lines", |b| {
        b.iter(|| {
            let index = parse_threedg_bytes(black_box(&data), &options).unwrap();
            black_box(index)
        })
    });
}

criterion_group!(
    benches,
    bench_reg2bin,
    bench_reg2bins,
    bench_range_query,
    bench_scale,
    bench_threedg_parsing,
);

criterion_main!(benches);
