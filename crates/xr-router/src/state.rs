use xr_core::PointerRecord;

/// Per-device router state, created on registration and dropped on unregistration.
///
/// All targets are ids into the host's scene; the router never owns scene objects.
#[derive(Debug)]
pub struct ControllerState<T> {
    pub(crate) hover: Option<T>,
    pub(crate) pressed: Option<T>,
    pub(crate) dragged: Option<T>,
    /// Boxed so its address is stable for the device's whole lifetime.
    pub(crate) record: Box<PointerRecord<T>>,
}

impl<T: Copy> ControllerState<T> {
    pub(crate) fn new() -> Self {
        Self {
            hover: None,
            pressed: None,
            dragged: None,
            record: Box::new(PointerRecord::new()),
        }
    }

    /// Object under the ray tip as of the last processed frame.
    pub fn hover_target(&self) -> Option<T> {
        self.hover
    }

    /// Object that received the press of the open press cycle.
    pub fn pressed_target(&self) -> Option<T> {
        self.pressed
    }

    /// Object receiving drag events; only set inside a press cycle.
    pub fn dragged_target(&self) -> Option<T> {
        self.dragged
    }

    pub fn record(&self) -> &PointerRecord<T> {
        &self.record
    }

    pub fn is_pressing(&self) -> bool {
        self.pressed.is_some() || self.dragged.is_some()
    }
}
