use glam::Vec3;

/// Projectile position `p0 + v0·t + ½·a·t²`.
pub fn position_at_time(
    time: f32,
    start_velocity: Vec3,
    start_position: Vec3,
    acceleration: Vec3,
) -> Vec3 {
    start_position + start_velocity * time + acceleration * (0.5 * time * time)
}

/// Recover the time at which the arc passes `target`.
///
/// The problem is projected onto the acceleration axis `ĝ`, giving `a·t² + b·t + c = 0` with
/// `a = ½(ĝ·g)`, `b = ĝ·v0`, `c = ĝ·p0 − ĝ·target`. Of the two roots, the one closer to
/// `near_time` wins: it tells the outbound leg from the return leg.
///
/// Returns `None` when the discriminant is negative (the point is above the apex). With zero
/// acceleration the path is a line and the time is the projection onto the start velocity.
pub fn time_at_position(
    start_velocity: Vec3,
    start_position: Vec3,
    acceleration: Vec3,
    target: Vec3,
    near_time: f32,
) -> Option<f32> {
    let Some(axis) = acceleration.try_normalize() else {
        return linear_time(start_velocity, start_position, target);
    };

    let a = 0.5 * axis.dot(acceleration);
    let b = axis.dot(start_velocity);
    let c = axis.dot(start_position) - axis.dot(target);

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let d = discriminant.sqrt();
    let t1 = (-b + d) / (2.0 * a);
    let t2 = (-b - d) / (2.0 * a);

    if (t1 - near_time).abs() > (t2 - near_time).abs() {
        Some(t2)
    } else {
        Some(t1)
    }
}

fn linear_time(start_velocity: Vec3, start_position: Vec3, target: Vec3) -> Option<f32> {
    let speed_squared = start_velocity.length_squared();
    if speed_squared <= f32::EPSILON {
        return None;
    }
    let time = (target - start_position).dot(start_velocity) / speed_squared;
    time.is_finite().then_some(time)
}

/// Fill `out` with evenly timed arc points from `t = 0` to `total_time`.
///
/// Point count is `floor(total_time / time_step) + 1`, at least 2 and at most `capacity`.
/// Leaves `out` empty when `total_time <= 0`. The buffer is cleared, not reallocated.
pub fn sample_arc(
    total_time: f32,
    start_velocity: Vec3,
    start_position: Vec3,
    acceleration: Vec3,
    time_step: f32,
    capacity: usize,
    out: &mut Vec<Vec3>,
) {
    out.clear();
    if !(total_time > 0.0) || !total_time.is_finite() || !(time_step > 0.0) || capacity < 2 {
        return;
    }

    let steps = (total_time / time_step).min(capacity as f32) as usize;
    let len = steps.saturating_add(1).clamp(2, capacity);
    let last = (len - 1) as f32;
    out.extend((0..len).map(|i| {
        let t = total_time * i as f32 / last;
        position_at_time(t, start_velocity, start_position, acceleration)
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_discriminant_has_no_solution() {
        // Thrown up at 1 m/s under 10 m/s² gravity: the apex is at 0.05 m, so 1 m is unreachable.
        let v0 = Vec3::new(0.0, 1.0, 0.0);
        let g = Vec3::new(0.0, -10.0, 0.0);
        let target = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(time_at_position(v0, Vec3::ZERO, g, target, 0.1), None);
    }

    #[test]
    fn near_time_picks_outbound_or_return_leg() {
        let v0 = Vec3::new(1.0, 10.0, 0.0);
        let g = Vec3::new(0.0, -10.0, 0.0);
        // Height 3.75 is crossed at t = 0.5 and t = 1.5.
        let up = position_at_time(0.5, v0, Vec3::ZERO, g);
        let early = time_at_position(v0, Vec3::ZERO, g, up, 0.4).expect("root");
        let late = time_at_position(v0, Vec3::ZERO, g, up, 1.6).expect("root");
        assert!((early - 0.5).abs() < 1e-4, "early={early}");
        assert!((late - 1.5).abs() < 1e-4, "late={late}");
    }

    #[test]
    fn stationary_line_has_no_time() {
        assert_eq!(
            time_at_position(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO, Vec3::X, 0.0),
            None
        );
    }

    #[test]
    fn sample_arc_respects_capacity_and_endpoints() {
        let v0 = Vec3::new(0.0, 0.0, 5.0);
        let g = Vec3::new(0.0, -9.81, 0.0);
        let mut out = Vec::new();

        sample_arc(1.0, v0, Vec3::ZERO, g, 0.25, 256, &mut out);
        assert_eq!(out.len(), 5);
        assert_eq!(out[0], Vec3::ZERO);
        let end = position_at_time(1.0, v0, Vec3::ZERO, g);
        assert!(out[4].distance(end) < 1e-5);

        sample_arc(100.0, v0, Vec3::ZERO, g, 0.05, 16, &mut out);
        assert_eq!(out.len(), 16);

        sample_arc(0.01, v0, Vec3::ZERO, g, 0.05, 256, &mut out);
        assert_eq!(out.len(), 2);

        sample_arc(0.0, v0, Vec3::ZERO, g, 0.05, 256, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn sample_arc_with_huge_step_ratio_is_capped() {
        let mut out = Vec::new();
        sample_arc(1e30, Vec3::Z, Vec3::ZERO, Vec3::ZERO, 1e-10, 16, &mut out);
        assert_eq!(out.len(), 16);
        assert_eq!(out[0], Vec3::ZERO);
    }
}
