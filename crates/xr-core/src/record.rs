use glam::Vec2;

use crate::{DeviceId, HitResult, Ray};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Every transition the router can deliver to a target (or mirror to a device).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PointerEventKind {
    HoverEnter,
    HoverExit,
    Press,
    Click,
    BeginDrag,
    Drag,
    EndDrag,
    Drop,
    PointerUp,
    Select,
    Deselect,
    UpdateSelected,
}

impl PointerEventKind {
    pub const fn tag(self) -> &'static str {
        match self {
            PointerEventKind::HoverEnter => "hover_enter",
            PointerEventKind::HoverExit => "hover_exit",
            PointerEventKind::Press => "press",
            PointerEventKind::Click => "click",
            PointerEventKind::BeginDrag => "begin_drag",
            PointerEventKind::Drag => "drag",
            PointerEventKind::EndDrag => "end_drag",
            PointerEventKind::Drop => "drop",
            PointerEventKind::PointerUp => "pointer_up",
            PointerEventKind::Select => "select",
            PointerEventKind::Deselect => "deselect",
            PointerEventKind::UpdateSelected => "update_selected",
        }
    }
}

/// Per-device pointer payload handed to every handler.
///
/// The router allocates exactly one record per registered device and reuses it for the device's
/// whole lifetime: [`PointerRecord::reset`] clears the per-frame fields in place, so handlers may
/// compare record identity across frames.
#[derive(Debug, Clone)]
pub struct PointerRecord<T> {
    /// Device currently being processed.
    pub device: Option<DeviceId>,
    /// Object the event being delivered is about (hover, press, drag or selection owner).
    pub current: Option<T>,
    /// Fixed screen-space centre; a laser is not a 2D mouse.
    pub position: Vec2,
    /// Always zero.
    pub delta: Vec2,
    pub press_position: Vec2,
    /// Ray the device produced this frame.
    pub ray: Option<Ray>,
    pub current_raycast: HitResult<T>,
    pub press_raycast: HitResult<T>,
    /// Deepest hovered object and the hovered ancestor chain, deepest first.
    pub pointer_enter: Option<T>,
    pub hovered: Vec<T>,
    pub pointer_press: Option<T>,
    pub pointer_drag: Option<T>,
    /// Router frame the record was last reset in.
    pub frame: u64,
}

impl<T> PointerRecord<T> {
    pub fn new() -> Self {
        Self {
            device: None,
            current: None,
            position: Vec2::ZERO,
            delta: Vec2::ZERO,
            press_position: Vec2::ZERO,
            ray: None,
            current_raycast: HitResult::miss(),
            press_raycast: HitResult::miss(),
            pointer_enter: None,
            hovered: Vec::new(),
            pointer_press: None,
            pointer_drag: None,
            frame: 0,
        }
    }

    /// Clear per-frame fields; hover, press and drag bookkeeping survive across frames.
    pub fn reset(&mut self, frame: u64, position: Vec2) {
        self.device = None;
        self.current = None;
        self.position = position;
        self.delta = Vec2::ZERO;
        self.ray = None;
        self.current_raycast = HitResult::miss();
        self.frame = frame;
    }
}

impl<T> Default for PointerRecord<T> {
    fn default() -> Self {
        Self::new()
    }
}
