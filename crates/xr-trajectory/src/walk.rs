use glam::Vec3;
use xr_core::{HitResult, Ray};

use crate::{position_at_time, time_at_position, ArcConfigError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArcWalkConfig {
    /// Simulated time between two arc samples.
    pub time_step: f32,
    /// Fraction of the segment length each probe starts behind the previous sample, so a walk
    /// that begins on a surface still reports it.
    pub back_margin: f32,
    /// Fraction of the segment length a hit may lie past the current sample.
    pub forward_margin: f32,
    /// Hard cap on probes per walk.
    pub max_steps: u32,
}

impl Default for ArcWalkConfig {
    fn default() -> Self {
        Self {
            time_step: 0.05,
            back_margin: 0.1,
            forward_margin: 0.1,
            max_steps: 4096,
        }
    }
}

impl ArcWalkConfig {
    pub fn validate(&self) -> Result<(), ArcConfigError> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(ArcConfigError::InvalidTimeStep(self.time_step));
        }
        let margin_ok = |m: f32| m.is_finite() && m >= 0.0;
        if !margin_ok(self.back_margin) || !margin_ok(self.forward_margin) {
            return Err(ArcConfigError::InvalidMargins {
                back: self.back_margin,
                forward: self.forward_margin,
            });
        }
        if self.max_steps == 0 {
            return Err(ArcConfigError::ZeroSteps);
        }
        Ok(())
    }

    /// Longest accepted hit distance for a probe covering `segment_length`.
    pub fn probe_reach(&self, segment_length: f32) -> f32 {
        (1.0 + self.back_margin + self.forward_margin) * segment_length
    }
}

/// Accepted collision of an arc walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcHit<T> {
    /// The probe that hit: starts behind the previous sample, points along the segment.
    pub ray: Ray,
    /// Arc time at the hit point.
    pub time: f32,
    pub point: Vec3,
    pub hit: HitResult<T>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArcOutcome<T> {
    Hit(ArcHit<T>),
    /// Budget exhausted (or the arc stopped moving). `elapsed` is the simulated time walked,
    /// which is still the length of the arc worth drawing.
    Miss { elapsed: f32 },
}

impl<T> ArcOutcome<T> {
    pub fn is_hit(&self) -> bool {
        matches!(self, ArcOutcome::Hit(_))
    }

    pub fn time(&self) -> f32 {
        match self {
            ArcOutcome::Hit(hit) => hit.time,
            ArcOutcome::Miss { elapsed } => *elapsed,
        }
    }

    pub fn hit(&self) -> Option<&ArcHit<T>> {
        match self {
            ArcOutcome::Hit(hit) => Some(hit),
            ArcOutcome::Miss { .. } => None,
        }
    }
}

/// Walk the arc in fixed time steps and return the first probe the scene reports a hit for.
///
/// Each step probes from the previous sample (pulled back by `back_margin`) towards the current
/// one. A hit is accepted when its distance lies in `(0, probe_reach(segment)]` and the arc time
/// at the hit point can be recovered; otherwise the walk continues until `max_path_length` of
/// arc has been covered. The raycast is called synchronously, at most `max_steps` times.
pub fn find_arc_collision<T, F>(
    acceleration: Vec3,
    start_position: Vec3,
    start_velocity: Vec3,
    max_path_length: f32,
    config: &ArcWalkConfig,
    mut raycast: F,
) -> ArcOutcome<T>
where
    F: FnMut(Vec3, Vec3) -> HitResult<T>,
{
    let mut time = 0.0_f32;
    let mut travelled = 0.0_f32;
    let mut steps = 0_u32;
    let mut p0 = start_position;

    if start_velocity == Vec3::ZERO && acceleration == Vec3::ZERO {
        tracing::trace!("arc walk skipped, the arc does not move");
        return ArcOutcome::Miss { elapsed: 0.0 };
    }

    while travelled < max_path_length && steps < config.max_steps {
        steps += 1;
        time += config.time_step;
        let p1 = position_at_time(time, start_velocity, start_position, acceleration);

        let segment = p0.distance(p1);
        if !segment.is_finite() {
            tracing::trace!(time, "arc walk stopped on a non-finite step");
            break;
        }
        // samples on either side of an apex can coincide; nothing to cast
        if segment <= 0.0 {
            p0 = p1;
            continue;
        }
        travelled += segment;

        let direction = (p1 - p0) / segment;
        let origin = p0 - direction * (config.back_margin * segment);
        let hit = raycast(origin, direction);

        if hit.is_hit() && hit.distance <= config.probe_reach(segment) {
            let point = origin + direction * hit.distance;
            match time_at_position(start_velocity, start_position, acceleration, point, time) {
                Some(hit_time) => {
                    tracing::trace!(steps, time = hit_time, distance = hit.distance, "arc hit");
                    return ArcOutcome::Hit(ArcHit {
                        ray: Ray { origin, direction },
                        time: hit_time,
                        point,
                        hit,
                    });
                }
                None => {
                    tracing::trace!(steps, "no time of flight for probe hit, step rejected");
                }
            }
        }

        p0 = p1;
    }

    if travelled < max_path_length && steps >= config.max_steps {
        tracing::debug!(
            steps,
            travelled,
            max_path_length,
            "arc walk hit its step cap before the path budget"
        );
    }
    ArcOutcome::Miss { elapsed: time }
}
