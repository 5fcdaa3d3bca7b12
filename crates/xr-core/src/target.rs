use core::fmt::Debug;
use core::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier for a scene object the router can point at.
///
/// The router never owns scene objects; it only stores these ids as weak back-references into a
/// scene owned by the host. Requirements:
/// - cheap to copy and compare (`Copy + Eq`)
/// - a stable numeric id (`stable_id`) for logs and traces
pub trait TargetId: Copy + Ord + Eq + Hash + Debug {
    fn stable_id(self) -> u64;
}

impl TargetId for u64 {
    fn stable_id(self) -> u64 {
        self
    }
}

impl TargetId for u32 {
    fn stable_id(self) -> u64 {
        self as u64
    }
}

impl TargetId for usize {
    fn stable_id(self) -> u64 {
        self as u64
    }
}

/// Handle the router hands out for a registered pointer device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceId(pub u32);

impl DeviceId {
    pub fn stable_id(self) -> u64 {
        self.0 as u64
    }
}
