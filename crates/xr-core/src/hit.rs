#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of a single raycast.
///
/// `distance <= 0` (or non-finite) is the "no hit" sentinel of the raycast contract; use
/// [`HitResult::is_hit`] rather than inspecting `target`, since environment geometry may be hit
/// without carrying a target.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HitResult<T> {
    pub target: Option<T>,
    pub distance: f32,
}

impl<T> HitResult<T> {
    pub const fn miss() -> Self {
        Self {
            target: None,
            distance: 0.0,
        }
    }

    pub const fn new(target: Option<T>, distance: f32) -> Self {
        Self { target, distance }
    }

    pub const fn hit(target: T, distance: f32) -> Self {
        Self {
            target: Some(target),
            distance,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.distance.is_finite() && self.distance > 0.0
    }

    /// Target of a valid hit; `None` for misses even if a stale target is attached.
    pub fn hit_target(&self) -> Option<&T> {
        if self.is_hit() {
            self.target.as_ref()
        } else {
            None
        }
    }
}

impl<T> Default for HitResult<T> {
    fn default() -> Self {
        Self::miss()
    }
}

/// Bitmask of scene layers a raycast may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);

    /// Mask with only layer `index` set; indices past 31 give an empty mask.
    pub const fn layer(index: u32) -> Self {
        match 1u32.checked_shl(index) {
            Some(bits) => Self(bits),
            None => Self::NONE,
        }
    }

    pub const fn contains(self, layers: u32) -> bool {
        self.0 & layers != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}
