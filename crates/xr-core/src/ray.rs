use glam::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Squared length below which a direction is treated as "no direction".
const MIN_DIRECTION_LENGTH_SQUARED: f32 = 1e-12;

/// A half-line with a unit-length direction.
///
/// Construct through [`Ray::try_new`]: zero-length or non-finite directions are malformed
/// geometry and mean "no ray this frame", never an error.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn try_new(origin: Vec3, direction: Vec3) -> Option<Self> {
        if !origin.is_finite() || !direction.is_finite() {
            return None;
        }
        if direction.length_squared() <= MIN_DIRECTION_LENGTH_SQUARED {
            return None;
        }
        Some(Self {
            origin,
            direction: direction.normalize(),
        })
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Tracked pose of a pointing device: where it is and where it aims.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose {
    pub position: Vec3,
    pub forward: Vec3,
}

impl Pose {
    pub const fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }

    /// Straight ray along `forward`; `None` when the device has no usable aim.
    pub fn ray(&self) -> Option<Ray> {
        Ray::try_new(self.position, self.forward)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::Z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_normalizes_direction() {
        let ray = Ray::try_new(Vec3::ZERO, Vec3::new(0.0, 0.0, 4.0)).expect("ray");
        assert_eq!(ray.direction, Vec3::Z);
        assert_eq!(ray.at(2.5), Vec3::new(0.0, 0.0, 2.5));
    }

    #[test]
    fn degenerate_directions_produce_no_ray() {
        assert!(Ray::try_new(Vec3::ZERO, Vec3::ZERO).is_none());
        assert!(Ray::try_new(Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 1.0)).is_none());
        assert!(Ray::try_new(Vec3::splat(f32::INFINITY), Vec3::Z).is_none());
        assert!(Pose::new(Vec3::ONE, Vec3::ZERO).ray().is_none());
    }
}
