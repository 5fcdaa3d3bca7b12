//! Headless scene for scenarios: axis-aligned boxes with logging handlers.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use glam::Vec3;
use tracing::info;
use xr_core::{HitResult, LayerMask, Ray};
use xr_pointer::PhysicalController;
use xr_router::{HandlerSet, Scene};

use crate::config::ObjectDef;

#[derive(Debug, Clone)]
struct SceneBox {
    id: u64,
    min: Vec3,
    max: Vec3,
    layer: u32,
    parent: Option<u64>,
}

impl SceneBox {
    /// Entry distance along `ray` (slab method), or `None` when the ray misses or starts inside.
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        let mut t_min = 0.0_f32;
        let mut t_max = f32::INFINITY;

        for i in 0..3 {
            let origin = ray.origin[i];
            let dir = ray.direction[i];
            if dir.abs() < 1e-8 {
                if origin < self.min[i] || origin > self.max[i] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / dir;
            let (t1, t2) = ((self.min[i] - origin) * inv, (self.max[i] - origin) * inv);
            t_min = t_min.max(t1.min(t2));
            t_max = t_max.min(t1.max(t2));
            if t_min > t_max {
                return None;
            }
        }
        (t_min > 0.0).then_some(t_min)
    }
}

pub struct BoxScene {
    boxes: Vec<SceneBox>,
    handlers: BTreeMap<u64, HandlerSet<u64>>,
}

impl BoxScene {
    pub fn from_objects(objects: &[ObjectDef]) -> Self {
        let mut handlers = BTreeMap::new();
        for object in objects.iter().filter(|o| !o.handlers.is_empty()) {
            let mut set = HandlerSet::new();
            for &kind in &object.handlers {
                let label = object.label();
                set.set(kind, move |record| {
                    info!(object = %label, event = kind.tag(), frame = record.frame, "handled");
                });
            }
            handlers.insert(object.id, set);
        }

        let boxes = objects
            .iter()
            .map(|o| SceneBox {
                id: o.id,
                min: o.min,
                max: o.max,
                layer: o.layer,
                parent: o.parent,
            })
            .collect();

        Self { boxes, handlers }
    }
}

impl Scene for BoxScene {
    type Target = u64;

    fn raycast(&self, ray: &Ray, mask: LayerMask) -> HitResult<u64> {
        self.boxes
            .iter()
            .filter(|b| mask.contains(LayerMask::layer(b.layer).0))
            .filter_map(|b| b.intersect(ray).map(|d| (b.id, d)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map_or_else(HitResult::miss, |(id, d)| HitResult::hit(id, d))
    }

    fn parent(&self, target: u64) -> Option<u64> {
        self.boxes.iter().find(|b| b.id == target).and_then(|b| b.parent)
    }

    fn handlers(&mut self, target: u64) -> Option<&mut HandlerSet<u64>> {
        self.handlers.get_mut(&target)
    }
}

/// Shared frame counter the harness advances before each router frame.
pub type FrameClock = Rc<Cell<u64>>;

/// Controller whose button edges are scheduled by frame number.
#[derive(Debug, Clone)]
pub struct ScriptedController {
    clock: FrameClock,
    presses: Vec<u64>,
    releases: Vec<u64>,
}

impl ScriptedController {
    pub fn new(clock: FrameClock, presses: Vec<u64>, releases: Vec<u64>) -> Self {
        Self {
            clock,
            presses,
            releases,
        }
    }
}

impl PhysicalController for ScriptedController {
    fn press_down(&mut self) -> bool {
        self.presses.contains(&self.clock.get())
    }

    fn press_up(&mut self) -> bool {
        self.releases.contains(&self.clock.get())
    }

    fn haptic_pulse(&mut self, duration_micros: u16) {
        tracing::debug!(frame = self.clock.get(), duration_micros, "haptic pulse");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(id: u64, z: f32, parent: Option<u64>) -> ObjectDef {
        ObjectDef {
            id,
            name: None,
            min: Vec3::new(-1.0, -1.0, z),
            max: Vec3::new(1.0, 1.0, z + 0.1),
            layer: id as u32,
            parent,
            handlers: Vec::new(),
        }
    }

    #[test]
    fn raycast_returns_nearest_box_on_mask() {
        let scene = BoxScene::from_objects(&[panel(1, 5.0, None), panel(2, 3.0, Some(1))]);
        let ray = Ray::try_new(Vec3::ZERO, Vec3::Z).unwrap();

        let hit = scene.raycast(&ray, LayerMask::ALL);
        assert_eq!(hit.target, Some(2));
        assert!((hit.distance - 3.0).abs() < 1e-5);

        let hit = scene.raycast(&ray, LayerMask::layer(1));
        assert_eq!(hit.target, Some(1));

        assert!(!scene.raycast(&ray, LayerMask::NONE).is_hit());
        assert_eq!(scene.parent(2), Some(1));
    }

    #[test]
    fn ray_starting_inside_a_box_does_not_hit_it() {
        let scene = BoxScene::from_objects(&[panel(1, -0.05, None)]);
        let ray = Ray::try_new(Vec3::ZERO, Vec3::Z).unwrap();
        assert!(!scene.raycast(&ray, LayerMask::ALL).is_hit());
    }

    #[test]
    fn scripted_controller_follows_clock() {
        let clock = FrameClock::default();
        let mut controller = ScriptedController::new(clock.clone(), vec![2], vec![4]);
        assert!(!controller.press_down());
        clock.set(2);
        assert!(controller.press_down());
        assert!(!controller.press_up());
        clock.set(4);
        assert!(controller.press_up());
    }
}
