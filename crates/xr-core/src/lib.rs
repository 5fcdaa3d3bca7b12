//! Shared vocabulary for VR pointer input.
//!
//! Everything here is plain data: rays, raycast hits, stable ids for scene objects and devices,
//! and the per-device pointer record handed to event handlers. The solver, pointer and router
//! crates build on these types without depending on each other's internals.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod hit;
pub mod ray;
pub mod record;
pub mod target;

pub use glam::{Vec2, Vec3};
pub use hit::{HitResult, LayerMask};
pub use ray::{Pose, Ray};
pub use record::{PointerEventKind, PointerRecord};
pub use target::{DeviceId, TargetId};

/// Raycast callback contract: `(origin, direction) -> nearest hit`.
///
/// Must run synchronously; the solver and router call it in the middle of a step.
pub type RaycastFn<'a, T> = dyn FnMut(Vec3, Vec3) -> HitResult<T> + 'a;
