#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

use xr_core::{DeviceId, PointerEventKind, TargetId};

/// A small, allocation-friendly trace event.
///
/// This is intentionally "dumb data" so it can be recorded during a frame and later rendered by
/// tooling.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub frame: u64,
    pub tag: Cow<'static, str>,
    pub device: Option<u64>,
    pub target: Option<u64>,
    /// Whether the target declared a handler for the event.
    pub handled: bool,
}

impl TraceEvent {
    pub fn new(frame: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            frame,
            tag: tag.into(),
            device: None,
            target: None,
            handled: false,
        }
    }

    /// Event delivered to `target` on behalf of `device` (if any).
    pub fn pointer<T: TargetId>(
        frame: u64,
        kind: PointerEventKind,
        device: Option<DeviceId>,
        target: T,
    ) -> Self {
        Self {
            frame,
            tag: Cow::Borrowed(kind.tag()),
            device: device.map(DeviceId::stable_id),
            target: Some(target.stable_id()),
            handled: false,
        }
    }

    pub fn with_device(mut self, device: u64) -> Self {
        self.device = Some(device);
        self
    }

    pub fn with_target(mut self, target: u64) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_handled(mut self, handled: bool) -> Self {
        self.handled = handled;
        self
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: TraceEvent) {}
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> + '_ {
        self.events.iter().map(|e| e.tag.as_ref())
    }
}

impl TraceSink for TraceLog {
    fn emit(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

/// Shared handle so the owner can read a sink it handed to the router.
impl<S: TraceSink> TraceSink for Rc<RefCell<S>> {
    fn emit(&mut self, event: TraceEvent) {
        self.borrow_mut().emit(event);
    }
}
