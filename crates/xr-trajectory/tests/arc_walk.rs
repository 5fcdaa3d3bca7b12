use glam::Vec3;
use xr_core::HitResult;
use xr_trajectory::{
    find_arc_collision, position_at_time, time_at_position, ArcOutcome, ArcWalkConfig,
};

const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

/// Scene with a single infinite wall facing -Z at `z = wall_z`.
fn wall_raycast(wall_z: f32) -> impl FnMut(Vec3, Vec3) -> HitResult<u32> {
    move |origin: Vec3, direction: Vec3| {
        if direction.z <= 0.0 || origin.z >= wall_z {
            return HitResult::miss();
        }
        HitResult::hit(1, (wall_z - origin.z) / direction.z)
    }
}

/// Horizontal ground plane at `y = height`.
fn ground_raycast(height: f32) -> impl FnMut(Vec3, Vec3) -> HitResult<u32> {
    move |origin: Vec3, direction: Vec3| {
        if direction.y >= 0.0 || origin.y <= height {
            return HitResult::miss();
        }
        HitResult::hit(2, (origin.y - height) / -direction.y)
    }
}

#[test]
fn position_at_time_zero_is_start_position() {
    let cases = [
        (GRAVITY, Vec3::new(0.0, 2.0, 8.0), Vec3::new(1.0, 1.5, -3.0)),
        (Vec3::new(3.0, 0.0, 0.0), Vec3::ZERO, Vec3::new(-4.0, 0.0, 2.0)),
        (Vec3::ZERO, Vec3::Z, Vec3::ONE),
    ];
    for (g, v0, p0) in cases {
        assert_eq!(position_at_time(0.0, v0, p0, g), p0);
    }
}

#[test]
fn time_at_position_inverts_position_at_time() {
    let v0 = Vec3::new(0.5, 6.0, 9.0);
    let p0 = Vec3::new(0.0, 1.2, 0.0);
    for &t in &[0.1_f32, 0.35, 0.6, 0.9, 1.4, 2.0] {
        let point = position_at_time(t, v0, p0, GRAVITY);
        let recovered = time_at_position(v0, p0, GRAVITY, point, t).expect("on-arc point");
        assert!(
            (recovered - t).abs() < 1e-3,
            "t={t} recovered={recovered}"
        );
    }
}

#[test]
fn no_hit_walk_reports_duration_of_exhausted_path() {
    let config = ArcWalkConfig::default();
    let speed = 10.0;
    let max_path_length = 25.0;
    let mut probes = 0;

    let outcome = find_arc_collision::<u32, _>(
        Vec3::ZERO,
        Vec3::ZERO,
        Vec3::new(0.0, 0.0, speed),
        max_path_length,
        &config,
        |_, _| {
            probes += 1;
            HitResult::miss()
        },
    );

    let ArcOutcome::Miss { elapsed } = outcome else {
        panic!("expected a miss, got {outcome:?}");
    };
    let expected = max_path_length / speed;
    assert!(
        (elapsed - expected).abs() <= config.time_step + 1e-4,
        "elapsed={elapsed} expected={expected}"
    );
    assert!(probes >= 50 && probes <= 51, "probes={probes}");
}

#[test]
fn hit_on_first_probe_returns_first_segment_ray() {
    let config = ArcWalkConfig::default();
    let start = Vec3::new(0.0, 1.5, 0.0);
    let v0 = Vec3::new(0.0, 2.0, 6.0);

    let outcome = find_arc_collision(GRAVITY, start, v0, 100.0, &config, |_, _| {
        HitResult::hit(9u32, 0.01)
    });

    let hit = outcome.hit().expect("expected a hit");
    let p1 = position_at_time(config.time_step, v0, start, GRAVITY);
    let segment = start.distance(p1);
    let direction = (p1 - start).normalize();

    assert!(hit.ray.direction.distance(direction) < 1e-5);
    let expected_origin = start - direction * (config.back_margin * segment);
    assert!(hit.ray.origin.distance(expected_origin) < 1e-5);
    assert_eq!(hit.hit.target, Some(9));
}

#[test]
fn gravity_free_arc_hits_wall_at_distance_over_speed() {
    let speed = 10.0;
    let outcome = find_arc_collision(
        Vec3::ZERO,
        Vec3::ZERO,
        Vec3::new(0.0, 0.0, speed),
        1000.0,
        &ArcWalkConfig::default(),
        wall_raycast(5.0),
    );

    let hit = outcome.hit().expect("expected a hit");
    assert!((hit.time - 5.0 / speed).abs() < 1e-4, "time={}", hit.time);
    assert!(hit.point.distance(Vec3::new(0.0, 0.0, 5.0)) < 1e-4);
    assert_eq!(hit.ray.direction, Vec3::Z);
}

#[test]
fn falling_arc_lands_on_ground_on_return_leg() {
    let start = Vec3::new(0.0, 1.5, 0.0);
    let v0 = Vec3::new(0.0, 4.0, 6.0);

    let outcome = find_arc_collision(
        GRAVITY,
        start,
        v0,
        1000.0,
        &ArcWalkConfig::default(),
        ground_raycast(0.0),
    );

    let hit = outcome.hit().expect("expected ground hit");
    // Analytic landing time: 1.5 + 4t - 4.905t² = 0.
    let analytic = (4.0 + (16.0_f32 + 4.0 * 4.905 * 1.5).sqrt()) / (2.0 * 4.905);
    assert!((hit.time - analytic).abs() < 1e-3, "time={} analytic={analytic}", hit.time);
    assert!(hit.point.y.abs() < 1e-3);
    assert!(hit.ray.direction.y < 0.0);
}

#[test]
fn distant_hits_beyond_probe_reach_are_ignored() {
    // Every probe reports a far-away surface; none is within the segment, so the walk misses.
    let outcome = find_arc_collision(
        Vec3::ZERO,
        Vec3::ZERO,
        Vec3::new(0.0, 0.0, 1.0),
        2.0,
        &ArcWalkConfig::default(),
        |_, _| HitResult::hit(3u32, 50.0),
    );
    assert!(!outcome.is_hit());
}

#[test]
fn vertical_throw_walks_past_a_coinciding_apex() {
    // the first sample lands back on the start point: 0.25 - 4 * 0.25^2 = 0
    let config = ArcWalkConfig {
        time_step: 0.25,
        ..Default::default()
    };
    let gravity = Vec3::new(0.0, -8.0, 0.0);
    let mut casts = 0;
    let mut floor = ground_raycast(-1.0);
    let outcome = find_arc_collision(
        gravity,
        Vec3::ZERO,
        Vec3::new(0.0, 1.0, 0.0),
        100.0,
        &config,
        |origin, direction| {
            casts += 1;
            floor(origin, direction)
        },
    );

    let hit = outcome.hit().expect("lands on the floor");
    assert!(casts >= 2);
    assert!((hit.point.y + 1.0).abs() < 1e-4);
    // 4t^2 - t - 1 = 0
    let expected = (1.0 + 17.0_f32.sqrt()) / 8.0;
    assert!((hit.time - expected).abs() < 1e-3, "time={}", hit.time);
}
