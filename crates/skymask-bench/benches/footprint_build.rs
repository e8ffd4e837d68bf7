//! Criterion benchmarks for footprint construction.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use skymask_footprint::{ExtinctionMap, FootprintBuilder, FootprintConfig, SurveyRegion};
use skymask_sphere::{HealpixGrid, SkyPixels};

/// Benchmark: full build, coordinates included, at three resolutions.
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("footprint_build");
    for nside in [16u32, 32, 64] {
        let builder = FootprintBuilder::new(FootprintConfig::with_nside(nside).unwrap()).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(nside), &builder, |b, builder| {
            b.iter(|| black_box(builder.build().unwrap()));
        });
    }
    group.finish();
}

/// Benchmark: layering only, on cached sky coordinates.
fn bench_build_on_cached_sky(c: &mut Criterion) {
    let config = FootprintConfig::with_nside(64).unwrap();
    let sky = SkyPixels::new(&config.nside);
    let builder = FootprintBuilder::new(config).unwrap();

    c.bench_function("footprint_build_on_nside64", |b| {
        b.iter(|| black_box(builder.build_on(&sky).unwrap()));
    });
}

/// Benchmark: one region predicate over every pixel of nside 64.
fn bench_region_select(c: &mut Criterion) {
    let grid = HealpixGrid::new(64).unwrap();
    let sky = SkyPixels::new(&grid);
    let config = FootprintConfig::with_nside(64).unwrap();
    let extinction = ExtinctionMap::default();
    let ebv = extinction.values(&sky).unwrap();

    c.bench_function("region_select_bulge_nside64", |b| {
        b.iter(|| black_box(SurveyRegion::Bulge.select(&sky, &ebv, &config.geometry)));
    });
}

criterion_group!(
    benches,
    bench_build,
    bench_build_on_cached_sky,
    bench_region_select
);
criterion_main!(benches);
