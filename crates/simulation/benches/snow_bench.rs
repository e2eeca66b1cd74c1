//! Criterion benchmarks for the weather systems.
//!
//! Benchmarks:
//!   - snow update with a static camera (integration only)
//!   - snow update with a moving camera (re-bucketing every frame)
//!   - rain update plus quick-sprite render
//!
//! Run with: cargo bench -p simulation --bench snow_bench --features bench

use std::num::NonZeroUsize;

use bevy::prelude::Vec3;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use simulation::effect_systems::EffectSystem;
use simulation::quick_sprite::QuickSprite;
use simulation::rain::init_rain_system;
use simulation::render_backend::RecordingBackend;
use simulation::settings::{RainParams, SnowParams};
use simulation::sim_rng::SimRng;
use simulation::snow::init_snow_system;
use simulation::test_harness::{frame_at, render_ctx};
use simulation::world_query::OpenSky;

const FLAKES: usize = 2000;

fn snow_system() -> EffectSystem {
    let count = NonZeroUsize::new(FLAKES).unwrap_or(NonZeroUsize::MIN);
    init_snow_system(count, &SnowParams::default()).into()
}

// ---------------------------------------------------------------------------
// Benchmark: snow update
// ---------------------------------------------------------------------------

fn bench_snow_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("snow_update");

    let mut rng = SimRng::default();
    let mut system = snow_system();
    system.update(&mut frame_at(0.016, Vec3::ZERO, &OpenSky, &mut rng));

    group.bench_function("static_camera_2000", |b| {
        b.iter(|| {
            let mut frame = frame_at(black_box(0.016), Vec3::ZERO, &OpenSky, &mut rng);
            system.update(&mut frame);
        });
    });

    let mut system = snow_system();
    let mut x = 0.0;
    group.bench_function("moving_camera_2000", |b| {
        b.iter(|| {
            // Far enough each frame to cross the re-bucket threshold.
            x += 30.0;
            let mut frame = frame_at(0.016, Vec3::new(x, 0.0, 0.0), &OpenSky, &mut rng);
            system.update(&mut frame);
        });
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: rain update + render
// ---------------------------------------------------------------------------

fn bench_rain_frame(c: &mut Criterion) {
    let mut rng = SimRng::default();
    let count = NonZeroUsize::new(FLAKES).unwrap_or(NonZeroUsize::MIN);
    let mut system: EffectSystem = init_rain_system(count, &RainParams::default(), &mut rng).into();
    let mut backend = RecordingBackend::default();
    let mut qs = QuickSprite::default();

    c.bench_function("rain_frame_2000", |b| {
        b.iter(|| {
            system.update(&mut frame_at(0.016, Vec3::ZERO, &OpenSky, &mut rng));
            backend.clear();
            system.render(&mut render_ctx(&mut backend, &mut qs));
            black_box(backend.draw_count());
        });
    });
}

criterion_group!(benches, bench_snow_update, bench_rain_frame);
criterion_main!(benches);
