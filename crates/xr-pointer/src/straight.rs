use xr_core::{Pose, Ray, RaycastFn, TargetId};

use crate::{HapticConfig, LaserVisual, PhysicalController, PointerDevice};

/// Laser along the tracked forward axis. Never consults the raycast.
#[derive(Debug, Clone)]
pub struct StraightPointer<C> {
    controller: C,
    pose: Pose,
    haptics: HapticConfig,
    visual: LaserVisual,
    last_ray: Option<Ray>,
}

impl<C: PhysicalController> StraightPointer<C> {
    pub fn new(controller: C) -> Self {
        Self {
            controller,
            pose: Pose::default(),
            haptics: HapticConfig::default(),
            visual: LaserVisual::default(),
            last_ray: None,
        }
    }

    pub fn with_haptics(mut self, haptics: HapticConfig) -> Self {
        self.haptics = haptics;
        self
    }

    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn last_ray(&self) -> Option<Ray> {
        self.last_ray
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
}

impl<T, C> PointerDevice<T> for StraightPointer<C>
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

    fn compute_ray(&mut self, _raycast: &mut RaycastFn<'_, T>) -> Option<Ray> {
        self.last_ray = self.pose.ray();
        self.last_ray
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
