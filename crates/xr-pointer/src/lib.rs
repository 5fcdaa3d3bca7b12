//! Pointer devices: the capability set the router drives every frame.
//!
//! A device answers button edges, produces a ray (possibly by solving a ballistic arc through the
//! raycast callback it is handed), and gets notified on hover changes. Two reference devices are
//! provided:
//! - [`StraightPointer`]: a laser along the tracked forward axis.
//! - [`BallisticPointer`]: a parabolic arc launched along the forward axis.
//!
//! Both drive an opaque [`PhysicalController`] for buttons and haptics.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod ballistic;
pub mod device;
pub mod error;
pub mod straight;
pub mod visual;

pub use ballistic::{BallisticConfig, BallisticPointer};
pub use device::{HapticConfig, PhysicalController, PointerDevice};
pub use error::PointerConfigError;
pub use straight::StraightPointer;
pub use visual::{LaserVisual, VisualRay};
