//! Criterion micro-benchmarks for pixelisation and coordinate transforms.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use skymask_sphere::{angular_separation, Equatorial, HealpixGrid, SkyPixels};

/// Benchmark: pixel centre of every pixel at nside 64 (49 152 pixels).
fn bench_pix2ang_nside64(c: &mut Criterion) {
    let grid = HealpixGrid::new(64).unwrap();
    c.bench_function("pix2ang_nside64", |b| {
        b.iter(|| {
            for pix in 0..grid.npix() {
                black_box(grid.pix2ang(pix));
            }
        });
    });
}

/// Benchmark: 10K deterministic positions back to pixel indices.
fn bench_radec2pix(c: &mut Criterion) {
    let grid = HealpixGrid::new(64).unwrap();
    let positions: Vec<(f64, f64)> = (0u64..10_000)
        .map(|i| {
            let ra = (i.wrapping_mul(6364136223846793005) >> 40) as f64 % 360.0;
            let dec = ((i.wrapping_mul(1442695040888963407) >> 40) as f64 % 180.0) - 90.0;
            (ra, dec)
        })
        .collect();

    c.bench_function("radec2pix_10k", |b| {
        b.iter(|| {
            for &(ra, dec) in &positions {
                black_box(grid.radec2pix(ra, dec));
            }
        });
    });
}

/// Benchmark: cache every coordinate frame for nside 64.
fn bench_sky_pixels(c: &mut Criterion) {
    let grid = HealpixGrid::new(64).unwrap();
    c.bench_function("sky_pixels_nside64", |b| {
        b.iter(|| black_box(SkyPixels::new(&grid)));
    });
}

/// Benchmark: separation of 10K pixel centres from a fixed point.
fn bench_separation(c: &mut Criterion) {
    let grid = HealpixGrid::new(32).unwrap();
    let sky = SkyPixels::new(&grid);
    let origin = Equatorial::new(80.894, -69.756);
    c.bench_function("angular_separation_nside32", |b| {
        b.iter(|| {
            for pix in 0..sky.len() {
                let p = Equatorial::new(sky.ra()[pix], sky.dec()[pix]);
                black_box(angular_separation(&origin, &p));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_pix2ang_nside64,
    bench_radec2pix,
    bench_sky_pixels,
    bench_separation
);
criterion_main!(benches);
