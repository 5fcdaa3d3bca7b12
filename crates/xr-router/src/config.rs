use glam::Vec2;
use xr_core::LayerMask;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RouterConfig {
    /// Layers every scene raycast is restricted to.
    pub layer_mask: LayerMask,
    /// Virtual screen the pointer position is expressed in.
    pub viewport: Vec2,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            layer_mask: LayerMask::ALL,
            viewport: Vec2::ONE,
        }
    }
}

impl RouterConfig {
    /// Fixed pointer position written into every record.
    pub fn screen_center(&self) -> Vec2 {
        self.viewport * 0.5
    }
}
