use xr_core::{PointerEventKind, PointerRecord, Pose, Ray, RaycastFn, TargetId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opaque physical controller: button edges and haptics.
///
/// Edges are "pressed since last poll" / "released since last poll"; a press and release that
/// both happen between two polls may be lost.
pub trait PhysicalController {
    fn press_down(&mut self) -> bool;
    fn press_up(&mut self) -> bool;
    fn haptic_pulse(&mut self, _duration_micros: u16) {}
}

/// A controller that may not be tracked yet reports no edges and ignores pulses.
impl<C: PhysicalController> PhysicalController for Option<C> {
    fn press_down(&mut self) -> bool {
        self.as_mut().is_some_and(|c| c.press_down())
    }

    fn press_up(&mut self) -> bool {
        self.as_mut().is_some_and(|c| c.press_up())
    }

    fn haptic_pulse(&mut self, duration_micros: u16) {
        if let Some(c) = self.as_mut() {
            c.haptic_pulse(duration_micros);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HapticConfig {
    pub enter_pulse_micros: u16,
    pub exit_pulse_micros: u16,
}

impl Default for HapticConfig {
    fn default() -> Self {
        Self {
            enter_pulse_micros: 1000,
            exit_pulse_micros: 600,
        }
    }
}

/// Capability set the router consumes. Only the ray and button edges are mandatory.
pub trait PointerDevice<T: TargetId> {
    fn button_down(&mut self) -> bool;

    fn button_up(&mut self) -> bool;

    /// Produce this frame's ray; `None` skips the device for the frame.
    ///
    /// `raycast` is the scene hit-test and must only be called synchronously from here.
    fn compute_ray(&mut self, raycast: &mut RaycastFn<'_, T>) -> Option<Ray>;

    fn on_hover_enter(&mut self, _target: T) {}

    fn on_hover_exit(&mut self, _target: T) {}

    /// Mirror of press/click/drag/up transitions delivered after the target received them.
    fn on_pointer_event(&mut self, _kind: PointerEventKind, _record: &PointerRecord<T>) {}

    /// Clamp the rendered ray to `distance` for the current frame.
    fn limit_visual_distance(&mut self, _distance: f32) {}

    /// Tracked pose update from the host.
    fn set_pose(&mut self, _pose: Pose) {}
}
