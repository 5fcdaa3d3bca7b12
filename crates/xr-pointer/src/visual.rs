#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What the renderer should draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VisualRay {
    /// Draw the hit marker at `length`.
    pub hit: bool,
    pub length: f32,
}

/// Per-frame visual length of a laser or arc.
///
/// The router calls [`LaserVisual::limit`] when its hit-test found a surface; the render pass
/// calls [`LaserVisual::resolve`] once per frame, which consumes the limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaserVisual {
    pub default_length: f32,
    limit: f32,
    pending: bool,
}

impl LaserVisual {
    pub fn new(default_length: f32) -> Self {
        Self {
            default_length,
            limit: 0.0,
            pending: false,
        }
    }

    pub fn limit(&mut self, distance: f32) {
        self.limit = distance;
        self.pending = true;
    }

    pub fn resolve(&mut self) -> VisualRay {
        let out = if self.pending && self.limit > 0.0 {
            VisualRay {
                hit: true,
                length: self.limit,
            }
        } else {
            VisualRay {
                hit: false,
                length: self.default_length,
            }
        };
        self.pending = false;
        out
    }
}

impl Default for LaserVisual {
    fn default() -> Self {
        Self::new(100.0)
    }
}
