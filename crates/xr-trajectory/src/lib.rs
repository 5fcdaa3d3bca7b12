//! Ballistic trajectory solver.
//!
//! Pure functions over explicit inputs, all in one reference frame:
//! - [`position_at_time`] / [`time_at_position`]: closed-form projectile motion and its inverse
//!   along the acceleration axis.
//! - [`find_arc_collision`]: fixed-step arc walk that probes the scene with short straight rays
//!   until one of them hits, bounded by a path-length budget.
//! - [`sample_arc`]: evenly timed polyline for drawing the arc.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod arc;
pub mod error;
pub mod walk;

pub use arc::{position_at_time, sample_arc, time_at_position};
pub use error::ArcConfigError;
pub use walk::{find_arc_collision, ArcHit, ArcOutcome, ArcWalkConfig};
