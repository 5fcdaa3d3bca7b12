use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use xr_core::HitResult;
use xr_trajectory::{find_arc_collision, sample_arc, ArcWalkConfig};

fn ground(origin: Vec3, direction: Vec3) -> HitResult<u32> {
    if direction.y >= 0.0 || origin.y <= 0.0 {
        return HitResult::miss();
    }
    HitResult::hit(1, origin.y / -direction.y)
}

fn bench_arc_walk(c: &mut Criterion) {
    let config = ArcWalkConfig::default();
    let gravity = Vec3::new(0.0, -9.81, 0.0);
    let start = Vec3::new(0.0, 1.5, 0.0);
    let velocity = Vec3::new(0.0, 5.0, 8.0);

    let mut group = c.benchmark_group("xr-trajectory/arc_walk");

    group.bench_function("ground_hit", |b| {
        b.iter(|| {
            let outcome = find_arc_collision(gravity, start, velocity, 1000.0, &config, ground);
            black_box(outcome.time());
        })
    });

    group.bench_function("budget_exhausted", |b| {
        b.iter(|| {
            let outcome = find_arc_collision::<u32, _>(
                gravity,
                start,
                velocity,
                1000.0,
                &config,
                |_, _| HitResult::miss(),
            );
            black_box(outcome.time());
        })
    });

    let mut points = Vec::with_capacity(256);
    group.bench_function("sample_arc_reuse", |b| {
        b.iter(|| {
            sample_arc(2.0, velocity, start, gravity, config.time_step, 256, &mut points);
            black_box(points.len());
        })
    });

    group.finish();
}

criterion_group!(benches, bench_arc_walk);
criterion_main!(benches);
