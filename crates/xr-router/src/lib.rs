//! Pointer event router.
//!
//! The router owns one [`ControllerState`] per registered [`PointerDevice`] and runs once per
//! frame: it asks every device for its ray, hit-tests the [`Scene`], and turns hover changes and
//! button edges into hover/press/click/drag/drop/up/select events on scene targets.
//!
//! ## Host contract
//!
//! - Construct one router and pass it around explicitly; there is no global instance.
//! - Update device poses before [`PointerEventRouter::process_frame`].
//! - Do not auto-pause the host's event processing while VR input is active: the router assumes
//!   it runs every frame.
//! - Register and unregister devices only between frames.
//!
//! ## Press semantics
//!
//! Click and begin-drag fire on the press edge, not on release. A hand-tracked ray jitters too
//! much for the desktop "released over the same object" rule.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
mod hierarchy;
pub mod router;
pub mod scene;
pub mod state;

pub use config::RouterConfig;
pub use error::RouterError;
pub use router::PointerEventRouter;
pub use scene::{Handler, HandlerSet, Scene};
pub use state::ControllerState;

pub use xr_pointer::PointerDevice;
