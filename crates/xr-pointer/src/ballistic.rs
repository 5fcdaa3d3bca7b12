use glam::Vec3;
use tracing::trace;
use xr_core::{Pose, Ray, RaycastFn, TargetId};
use xr_trajectory::{find_arc_collision, sample_arc, ArcConfigError, ArcOutcome, ArcWalkConfig};

use crate::{HapticConfig, LaserVisual, PhysicalController, PointerConfigError, PointerDevice};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BallisticConfig {
    /// Launch speed along the forward axis (units per arc time unit).
    pub launch_speed: f32,
    pub gravity: Vec3,
    /// Arc length budget of one walk.
    pub max_path_length: f32,
    pub walk: ArcWalkConfig,
    /// Maximum number of polyline points kept for drawing.
    pub arc_point_capacity: usize,
}

impl Default for BallisticConfig {
    fn default() -> Self {
        Self {
            launch_speed: 10.0,
            gravity: Vec3::new(0.0, -9.81, 0.0),
            max_path_length: 1000.0,
            walk: ArcWalkConfig::default(),
            arc_point_capacity: 256,
        }
    }
}

impl BallisticConfig {
    pub fn validate(&self) -> Result<(), PointerConfigError> {
        if !(self.launch_speed.is_finite() && self.launch_speed >= 0.0) {
            return Err(PointerConfigError::InvalidLaunchSpeed(self.launch_speed));
        }
        if !self.gravity.is_finite() {
            return Err(PointerConfigError::NonFiniteGravity);
        }
        if !(self.max_path_length.is_finite() && self.max_path_length > 0.0) {
            return Err(ArcConfigError::InvalidPathLength(self.max_path_length).into());
        }
        self.walk.validate()?;
        Ok(())
    }
}

/// Parabolic pointer: the ray is the arc-walk probe that found the first surface.
///
/// When the arc finds nothing within its budget the device still answers with a ray along the
/// aimed direction, and the drawn arc covers the whole elapsed walk.
#[derive(Debug, Clone)]
pub struct BallisticPointer<C> {
    controller: C,
    config: BallisticConfig,
    pose: Pose,
    haptics: HapticConfig,
    visual: LaserVisual,
    last_ray: Option<Ray>,
    arc_time: f32,
    arc_hit: Option<Vec3>,
    arc_points: Vec<Vec3>,
}

impl<C: PhysicalController> BallisticPointer<C> {
    pub fn new(controller: C, config: BallisticConfig) -> Result<Self, PointerConfigError> {
        config.validate()?;
        Ok(Self {
            controller,
            config,
            pose: Pose::default(),
            haptics: HapticConfig::default(),
            visual: LaserVisual::default(),
            last_ray: None,
            arc_time: 0.0,
            arc_hit: None,
            arc_points: Vec::with_capacity(config.arc_point_capacity),
        })
    }

    pub fn with_haptics(mut self, haptics: HapticConfig) -> Self {
        self.haptics = haptics;
        self
    }

    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    pub fn config(&self) -> &BallisticConfig {
        &self.config
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn last_ray(&self) -> Option<Ray> {
        self.last_ray
    }

    /// Arc time drawn this frame: time of flight to the hit, or the whole walk on a miss.
    pub fn arc_time(&self) -> f32 {
        self.arc_time
    }

    /// Where the arc landed, if it landed.
    pub fn arc_hit(&self) -> Option<Vec3> {
        self.arc_hit
    }

    /// Polyline of the arc for the renderer, rebuilt on every `compute_ray`.
    pub fn arc_points(&self) -> &[Vec3] {
        &self.arc_points
    }

    pub fn visual_mut(&mut self) -> &mut LaserVisual {
        &mut self.visual
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    fn clear_arc(&mut self) {
        self.last_ray = None;
        self.arc_time = 0.0;
        self.arc_hit = None;
        self.arc_points.clear();
    }
}

impl<T, C> PointerDevice<T> for BallisticPointer<C>
where
    T: TargetId,
    C: PhysicalController,
{
    fn button_down(&mut self) -> bool {
        self.controller.press_down()
    }

    fn button_up(&mut self) -> bool {
        self.controller.press_up()
    }

    fn compute_ray(&mut self, raycast: &mut RaycastFn<'_, T>) -> Option<Ray> {
        let Some(aim) = self.pose.forward.try_normalize() else {
            trace!(forward = ?self.pose.forward, "ballistic pointer has no aim");
            self.clear_arc();
            return None;
        };

        let start = self.pose.position;
        let velocity = aim * self.config.launch_speed;
        let outcome = find_arc_collision(
            self.config.gravity,
            start,
            velocity,
            self.config.max_path_length,
            &self.config.walk,
            &mut *raycast,
        );

        self.arc_time = outcome.time();
        let ray = match &outcome {
            ArcOutcome::Hit(hit) => {
                self.arc_hit = Some(hit.point);
                Some(hit.ray)
            }
            ArcOutcome::Miss { elapsed } => {
                trace!(elapsed, "arc found no surface, aiming along the launch direction");
                self.arc_hit = None;
                Ray::try_new(start, aim)
            }
        };
        self.last_ray = ray;

        sample_arc(
            self.arc_time,
            velocity,
            start,
            self.config.gravity,
            self.config.walk.time_step,
            self.config.arc_point_capacity,
            &mut self.arc_points,
        );

        ray
    }

    fn on_hover_enter(&mut self, _target: T) {
        self.controller.haptic_pulse(self.haptics.enter_pulse_micros);
    }

    fn on_hover_exit(&mut self, _target: T) {
        self.controller.haptic_pulse(self.haptics.exit_pulse_micros);
    }

    fn limit_visual_distance(&mut self, distance: f32) {
        self.visual.limit(distance);
    }

    fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }
}
