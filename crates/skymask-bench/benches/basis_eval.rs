//! Criterion benchmarks for basis-set evaluation and counter updates.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use skymask_basis::{BasisValue, EvalContext};
use skymask_bench::{
    reference_basis_set, reference_footprint, reference_registry, replay_visits, seeded_visits,
};
use skymask_core::Conditions;
use skymask_sphere::SkyPixels;

/// Benchmark: feasibility plus value of every basis function, nside 32.
fn bench_evaluate_reference_set(c: &mut Criterion) {
    let maps = reference_footprint(32).unwrap();
    let npix = maps.grid().npix();
    let basis = reference_basis_set(&maps).unwrap();
    let mut registry = reference_registry(npix, &basis);
    replay_visits(&mut registry, &seeded_visits(npix, 3, 300, 20, 42)).unwrap();

    let sky = SkyPixels::new(maps.grid());
    let conditions = Conditions::new(npix)
        .with_night(2)
        .with_moon_alt_degrees(-30.0)
        .with_hour_angle(sky.hour_angles(5.5))
        .unwrap();

    c.bench_function("evaluate_reference_set_nside32", |b| {
        b.iter(|| {
            let ctx = EvalContext::new(&conditions, &registry);
            let mut total = vec![0.0; npix];
            for basis in &basis {
                if !basis.check_feasibility(&ctx).unwrap() {
                    break;
                }
                if let BasisValue::Map(values) = basis.calc_value(&ctx).unwrap() {
                    for (t, v) in total.iter_mut().zip(values) {
                        *t += v;
                    }
                }
            }
            black_box(total)
        });
    });
}

/// Benchmark: hour angles of every pixel at nside 64.
fn bench_hour_angles(c: &mut Criterion) {
    let maps = reference_footprint(64).unwrap();
    let sky = SkyPixels::new(maps.grid());
    c.bench_function("hour_angles_nside64", |b| {
        b.iter(|| black_box(sky.hour_angles(black_box(13.25))));
    });
}

/// Benchmark: 1000 visits of 20 pixels each into a two-counter registry.
fn bench_counter_updates(c: &mut Criterion) {
    let maps = reference_footprint(32).unwrap();
    let npix = maps.grid().npix();
    let basis = reference_basis_set(&maps).unwrap();
    let visits = seeded_visits(npix, 10, 1000, 20, 7);

    c.bench_function("counter_updates_1k_visits", |b| {
        b.iter(|| {
            let mut registry = reference_registry(npix, &basis);
            replay_visits(&mut registry, &visits).unwrap();
            black_box(registry)
        });
    });
}

criterion_group!(
    benches,
    bench_evaluate_reference_set,
    bench_hour_angles,
    bench_counter_updates
);
criterion_main!(benches);
