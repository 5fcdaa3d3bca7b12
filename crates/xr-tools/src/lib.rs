//! Tooling primitives for VR pointer input.
//!
//! This crate is intentionally lightweight and engine-agnostic: it records what the router
//! dispatched so tooling (the headless harness, inspectors, tests) can replay or render it.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{NullTraceSink, TraceEvent, TraceLog, TraceSink};
